mod fixtures;

use app_logger::internal::logger::strip_trailing_line;
use app_logger::{Logger, LoggerStream, LoggingConfig};
use fixtures::writers::{CaptureWriter, FailingWriter};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::io::Write;

    fn stream_with_capture() -> (LoggerStream, CaptureWriter, CaptureWriter) {
        let mut config = LoggingConfig::default();
        config.console.colorize = false;
        config.console.json = true;
        let file = CaptureWriter::new();
        let console = CaptureWriter::new();
        let logger = Logger::builder(config)
            .file_writer(file.clone())
            .console_writer(console.clone())
            .build()
            .unwrap();
        (logger.stream(), file, console)
    }

    fn messages(writer: &CaptureWriter) -> Vec<(String, String)> {
        writer
            .lines()
            .iter()
            .map(|l| {
                let entry: Value = serde_json::from_str(l).unwrap();
                (
                    entry["level"].as_str().unwrap().to_string(),
                    entry["message"].as_str().unwrap().to_string(),
                )
            })
            .collect()
    }

    // ==================== strip_trailing_line ====================

    #[test]
    fn test_strip_single_trailing_newline() {
        assert_eq!(strip_trailing_line("GET /health 200\n"), "GET /health 200");
    }

    #[test]
    fn test_strip_cuts_at_last_newline() {
        assert_eq!(strip_trailing_line("a\nb\n"), "a\nb");
        assert_eq!(strip_trailing_line("abc\ndef"), "abc");
        assert_eq!(strip_trailing_line("line\n\n"), "line\n");
    }

    #[test]
    fn test_strip_without_newline_keeps_message() {
        assert_eq!(strip_trailing_line("no newline"), "no newline");
        assert_eq!(strip_trailing_line(""), "");
    }

    #[test]
    fn test_strip_lone_newline_is_empty() {
        assert_eq!(strip_trailing_line("\n"), "");
    }

    #[test]
    fn test_strip_handles_multibyte_text() {
        assert_eq!(strip_trailing_line("héllo wörld ✓\n"), "héllo wörld ✓");
    }

    // ==================== LoggerStream ====================

    #[test]
    fn test_write_forwards_at_info() {
        let (stream, file, console) = stream_with_capture();

        stream.write("GET /health 200\n");

        assert_eq!(
            messages(&console),
            vec![("INFO".to_string(), "GET /health 200".to_string())]
        );
        // info is below the file sink minimum
        assert!(file.contents().is_empty());
    }

    #[test]
    fn test_write_without_newline_forwards_whole_message() {
        let (stream, _, console) = stream_with_capture();

        stream.write("POST /login 401");

        assert_eq!(messages(&console)[0].1, "POST /login 401");
    }

    #[test]
    fn test_each_write_is_one_entry() {
        let (stream, _, console) = stream_with_capture();

        stream.write("first\n");
        stream.write("second\n");
        stream.write("third\n");

        let forwarded: Vec<String> = messages(&console).into_iter().map(|(_, m)| m).collect();
        assert_eq!(forwarded, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_io_write_uses_same_rule() {
        let (mut stream, _, console) = stream_with_capture();

        let written = Write::write(&mut stream, b"GET /users 200 12ms\n").unwrap();
        Write::write(&mut stream, b"GET /a 200\nGET /b 200\n").unwrap();
        stream.flush().unwrap();

        assert_eq!(written, 20);
        let forwarded: Vec<String> = messages(&console).into_iter().map(|(_, m)| m).collect();
        assert_eq!(forwarded, vec!["GET /users 200 12ms", "GET /a 200\nGET /b 200"]);
    }

    #[test]
    fn test_io_write_replaces_invalid_utf8() {
        let (mut stream, _, console) = stream_with_capture();

        Write::write_all(&mut stream, b"bad \xff byte\n").unwrap();

        assert_eq!(messages(&console)[0].1, "bad \u{fffd} byte");
    }

    #[test]
    fn test_write_never_raises_when_sinks_fail() {
        let logger = Logger::builder(LoggingConfig::default())
            .file_writer(FailingWriter::new())
            .console_writer(FailingWriter::new())
            .build()
            .unwrap();
        let stream = LoggerStream::new(logger);

        stream.write("dropped\n");
        stream.write("also dropped");
    }
}
