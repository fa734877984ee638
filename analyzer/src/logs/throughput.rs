use super::{parse_lines, read_log};
use crate::analytics::stream::{Sample, Stream};
use crate::args::defaults::THROUGHPUT_LOG_PREFIX;
use crate::error::AnalyzerError;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn throughput_log_path(log_dir: &Path, partition: u32) -> PathBuf {
    log_dir.join(format!("{THROUGHPUT_LOG_PREFIX}{partition}.txt"))
}

/// `count timestamp [height] [validator]`; anything after the validator is
/// ignored. With `has_height_column` a line without a valid height is
/// malformed. Otherwise trailing columns are optional and a lone third
/// column is the validator, even when it is all digits.
fn parse_sample(tokens: &[&str], has_height_column: bool) -> Option<Sample> {
    let count = tokens.first()?.parse::<i64>().ok()?;
    let timestamp_ns = tokens.get(1)?.parse::<i64>().ok()?;
    let mut sample = Sample::new(timestamp_ns, count);

    match (tokens.get(2), tokens.get(3)) {
        // `count timestamp validator`
        (Some(validator), None) if !has_height_column => {
            return Some(sample.with_validator(validator));
        }
        (Some(token), _) => match token.parse::<u64>() {
            Ok(height) => sample = sample.with_height(height),
            Err(_) if has_height_column => return None,
            Err(_) => {}
        },
        (None, _) if has_height_column => return None,
        (None, _) => {}
    }
    if let Some(validator) = tokens.get(3) {
        sample = sample.with_validator(validator);
    }
    Some(sample)
}

pub fn parse_throughput_log(
    path: &Path,
    partition: u32,
    has_height_column: bool,
) -> Result<Stream, AnalyzerError> {
    let content = read_log(path)?;
    let samples = parse_lines(path, &content, |tokens| {
        parse_sample(tokens, has_height_column)
    });
    let stream = Stream::from_raw(partition, samples);
    info!(
        "Loaded {} samples of partition {} from {}",
        stream.len(),
        partition,
        path.display()
    );
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use test_case::test_case;

    #[test_case("10 1000", false, Some((1000, 10, None)) ; "two columns")]
    #[test_case("10 1000 7 ab12", true, Some((1000, 10, Some(7))) ; "with height")]
    #[test_case("10 1000", true, None ; "missing height")]
    #[test_case("10 1000 x", true, None ; "bad height")]
    #[test_case("10 1000 x", false, Some((1000, 10, None)) ; "validator instead of height")]
    #[test_case("ten 1000", false, None ; "bad count")]
    #[test_case("10", false, None ; "missing timestamp")]
    fn sample_lines_should_parse(
        line: &str,
        has_height_column: bool,
        expected: Option<(i64, i64, Option<u64>)>,
    ) {
        let tokens = line.split_whitespace().collect::<Vec<_>>();

        let sample = parse_sample(&tokens, has_height_column);

        assert_eq!(
            sample.map(|s| (s.timestamp_ns, s.count, s.height)),
            expected
        );
    }

    #[test]
    fn validator_should_be_kept_as_text() {
        let tokens = ["3", "5", "9", "0xDEADBEEF"];

        let sample = parse_sample(&tokens, true).unwrap();

        assert_eq!(sample.validator.as_deref(), Some("0xDEADBEEF"));
    }

    #[test]
    fn third_column_validator_should_be_kept_without_height_column() {
        let tokens = ["3", "5", "7AB1F0"];

        let sample = parse_sample(&tokens, false).unwrap();

        assert_eq!(sample.height, None);
        assert_eq!(sample.validator.as_deref(), Some("7AB1F0"));
    }

    #[test_case(&["3", "5", "1234"], false, None, Some("1234") ; "numeric validator alone")]
    #[test_case(&["3", "5", "1234", "99"], false, Some(1234), Some("99") ; "height then validator")]
    #[test_case(&["3", "5", "1234"], true, Some(1234), None ; "height column without validator")]
    fn numeric_third_column_should_follow_line_shape(
        tokens: &[&str],
        has_height_column: bool,
        height: Option<u64>,
        validator: Option<&str>,
    ) {
        let sample = parse_sample(tokens, has_height_column).unwrap();

        assert_eq!(sample.height, height);
        assert_eq!(sample.validator.as_deref(), validator);
    }

    #[test]
    fn log_should_be_parsed_into_ordered_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = throughput_log_path(dir.path(), 2);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "0 100 1 v1\n5 200 2 v2\ngarbage\n7 150 3 v3\n9 300 4 v1").unwrap();

        let stream = parse_throughput_log(&path, 2, true).unwrap();

        assert_eq!(stream.partition, 2);
        let counts = stream.samples.iter().map(|s| s.count).collect::<Vec<_>>();
        assert_eq!(counts, vec![0, 5, 9]);
    }
}
