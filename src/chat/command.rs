/// Commands understood by the bot, from a slash command or a mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `challenge` or `beat`, followed by an opponent
    Challenge,
    /// `rankers`: the team leaderboard
    Rankers,
    Help,
    Unknown,
}

impl Command {
    pub fn parse(text: &str) -> Self {
        let word = text.split_whitespace().next().unwrap_or_default();
        match word.to_ascii_lowercase().as_str() {
            "challenge" | "beat" => Command::Challenge,
            "rankers" | "leaderboard" => Command::Rankers,
            "help" => Command::Help,
            _ => Command::Unknown,
        }
    }

    /// Mention messages only react to keywords anywhere in the text and never
    /// to text that looks like a slash command.
    pub fn parse_mention(text: &str) -> Option<Self> {
        if text.trim_start().starts_with('/') {
            return None;
        }
        let words: Vec<String> = text
            .split_whitespace()
            .map(|w| w.to_ascii_lowercase())
            .collect();
        if words.iter().any(|w| w == "challenge" || w == "beat") {
            Some(Command::Challenge)
        } else if words.iter().any(|w| w == "rankers" || w == "leaderboard") {
            Some(Command::Rankers)
        } else {
            None
        }
    }
}

pub fn help_text(command_name: &str) -> String {
    format!(
        "Use `{cmd}` to play a game.\n Available commands are:\n \
         • `{cmd} challenge [@opponent]` starts a new game.\n \
         • `{cmd} beat [@opponent]` starts a new game also.\n \
         • `{cmd} rankers` shows a list of top rankers of your team.",
        cmd = command_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("challenge <@U2>"), Command::Challenge);
        assert_eq!(Command::parse("beat me"), Command::Challenge);
        assert_eq!(Command::parse("RANKERS"), Command::Rankers);
        assert_eq!(Command::parse("help"), Command::Help);
        assert_eq!(Command::parse("dance"), Command::Unknown);
        assert_eq!(Command::parse(""), Command::Unknown);
    }

    #[test]
    fn test_parse_mention_messages() {
        assert_eq!(
            Command::parse_mention("<@UBOT> I will beat <@U2>"),
            Some(Command::Challenge)
        );
        assert_eq!(Command::parse_mention("show rankers"), Some(Command::Rankers));
        assert_eq!(Command::parse_mention("/oxo challenge <@U2>"), None);
        assert_eq!(Command::parse_mention("hello there"), None);
    }

    #[test]
    fn test_help_mentions_every_command() {
        let help = help_text("/oxo");
        assert!(help.contains("`/oxo challenge [@opponent]`"));
        assert!(help.contains("`/oxo beat [@opponent]`"));
        assert!(help.contains("`/oxo rankers`"));
    }
}
