/// One client request, parsed from the second control message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `-l`: send the working-directory listing on the data stream.
    List,
    /// `-g <filename>`: stream the named file on the data stream. The
    /// name may be empty at parse time; the controller rejects that.
    Get(String),
    /// Anything else, including an empty message.
    Malformed,
}

/// Classifies one control message. Prefix matching is strict and
/// positional: byte 0 must be `-`, byte 1 selects the command, and `-g`
/// requires exactly one space before the filename. No whitespace is
/// trimmed beyond what the transport delivered.
pub fn parse_command(message: &[u8]) -> Action {
    if message == b"-l" {
        return Action::List;
    }
    if let Some(rest) = message.strip_prefix(b"-g ") {
        return match std::str::from_utf8(rest) {
            Ok(filename) => Action::Get(filename.to_string()),
            Err(_) => Action::Malformed,
        };
    }
    Action::Malformed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_list_flag() {
        assert_eq!(parse_command(b"-l"), Action::List);
    }

    #[test]
    fn get_with_filename() {
        assert_eq!(
            parse_command(b"-g notes.txt"),
            Action::Get(String::from("notes.txt"))
        );
    }

    #[test]
    fn get_filename_may_contain_spaces() {
        assert_eq!(
            parse_command(b"-g my notes.txt"),
            Action::Get(String::from("my notes.txt"))
        );
    }

    #[test]
    fn get_with_nothing_after_prefix_is_empty_filename() {
        assert_eq!(parse_command(b"-g "), Action::Get(String::new()));
    }

    #[test]
    fn get_without_trailing_space_is_malformed() {
        assert_eq!(parse_command(b"-g"), Action::Malformed);
    }

    #[test]
    fn unknown_flags_and_noise_are_malformed() {
        assert_eq!(parse_command(b"-x"), Action::Malformed);
        assert_eq!(parse_command(b""), Action::Malformed);
        assert_eq!(parse_command(b"list"), Action::Malformed);
        assert_eq!(parse_command(b"g -l"), Action::Malformed);
    }

    #[test]
    fn no_whitespace_trimming_is_performed() {
        assert_eq!(parse_command(b" -l"), Action::Malformed);
        assert_eq!(parse_command(b"-l\n"), Action::Malformed);
        assert_eq!(parse_command(b"-l "), Action::Malformed);
    }
}
