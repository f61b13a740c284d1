//! Core processing engine
//!
//! Runs one pass over a single input file: check it exists, read it, scan
//! for emails, and write the unique ones out. Each stage is reported as it
//! happens; any failure is turned into a printed diagnostic and a `None`
//! result instead of being propagated.

use bytesize::ByteSize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Args, DEFAULT_INPUT, DEFAULT_OUTPUT};
use crate::encoding::read_text;
use crate::error::{FilterError, Result};
use crate::extract::extract_unique;
use crate::output::write_emails;
use crate::progress::{plural_emails, Reporter};

/// Processor configuration
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub quiet: bool,
}

impl ProcessorConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            quiet: false,
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self {
            input: args.input.clone(),
            output: args.output.clone(),
            quiet: args.quiet,
        }
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT, DEFAULT_OUTPUT)
    }
}

/// Main processor
pub struct Processor {
    config: ProcessorConfig,
    reporter: Reporter,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        let reporter = Reporter::new(config.quiet);
        Self { config, reporter }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Run the filter and report the outcome
    ///
    /// Returns the number of unique emails found (`Some(0)` when the file
    /// had none), or `None` if the run failed.
    pub fn run(&self) -> Option<usize> {
        match self.process() {
            Ok(emails) => Some(emails.len()),
            Err(e) => {
                log::debug!("run failed: {}", e);
                self.reporter.error(&e);
                None
            }
        }
    }

    /// Run every stage, stopping at the first failure
    ///
    /// Returns the unique emails in first-seen order. When none are found
    /// the output file is not touched.
    pub fn process(&self) -> Result<Vec<String>> {
        let input = self.config.input.as_path();
        let output = self.config.output.as_path();

        log::debug!("input {:?}, output {:?}", input, output);

        if !input.exists() {
            log::debug!("input {:?} does not exist", input);
            return Err(FilterError::FileNotFound {
                path: input.to_path_buf(),
            });
        }

        self.reporter.info(&format!("reading: {}{}", input.display(), describe_size(input)));
        let content = read_text(input)?;

        self.reporter.info("looking for emails...");
        let emails = extract_unique(&content);
        let stats = emails.stats();
        log::debug!(
            "{} match(es), {} unique, {} duplicate(s) dropped",
            stats.total_processed,
            stats.unique_count,
            stats.duplicate_count
        );

        if emails.is_empty() {
            log::info!("no emails found in {:?}", input);
            self.reporter.warning("no emails found");
            return Ok(Vec::new());
        }

        let count = emails.len();
        self.reporter
            .info(&format!("saving {} to: {}", plural_emails(count), output.display()));
        let bytes = write_emails(emails.as_slice(), output)?;
        log::info!("wrote {} email(s) ({}) to {:?}", count, ByteSize(bytes), output);

        let emails = emails.into_vec();
        log::debug!("emails found: {}", emails.join(", "));
        self.reporter.success(&format!("done! found {}", plural_emails(count)));
        self.reporter.numbered("emails found:", &emails);

        Ok(emails)
    }
}

/// ` (1.2 KB)`, or nothing if the size can't be read
fn describe_size(path: &Path) -> String {
    fs::metadata(path)
        .map(|m| format!(" ({})", ByteSize(m.len())))
        .unwrap_or_default()
}

/// Filter emails from `input` into `output` without the opening/closing lines
pub fn filter_emails_from_file(input: &Path, output: &Path) -> Option<usize> {
    Processor::new(ProcessorConfig::new(input, output)).run()
}

/// Full run as the binary does it: banner, the filter itself, closing line
pub fn run_email_filter(config: ProcessorConfig) -> Option<usize> {
    let processor = Processor::new(config);
    let reporter = Reporter::new(processor.config().quiet);

    reporter.banner();
    let result = processor.run();
    reporter.rule();

    match result {
        Some(count) => reporter.success(&format!("finished! processed {}", plural_emails(count))),
        None => reporter.failure("failed - check the errors above"),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    fn quiet_processor(input: &Path, output: &Path) -> Processor {
        let mut config = ProcessorConfig::new(input, output);
        config.quiet = true;
        Processor::new(config)
    }

    #[test]
    fn test_finds_and_writes_unique_emails() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("before.txt");
        let output = dir.path().join("after.txt");
        fs::write(
            &input,
            "contact alice@example.com or bob@Example.COM, alice@example.com again",
        )
        .unwrap();

        let processor = quiet_processor(&input, &output);
        assert_eq!(processor.run(), Some(2));
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "alice@example.com, bob@Example.COM"
        );
    }

    #[test]
    fn test_no_emails_skips_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("before.txt");
        let output = dir.path().join("out").join("after.txt");
        fs::write(&input, "no addresses in here\njust words").unwrap();

        assert_eq!(quiet_processor(&input, &output).run(), Some(0));
        assert!(!output.exists());
        assert!(!output.parent().unwrap().exists());
    }

    #[test]
    fn test_no_emails_leaves_existing_output_alone() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("before.txt");
        let output = dir.path().join("after.txt");
        fs::write(&input, "nothing").unwrap();
        fs::write(&output, "old@run.com").unwrap();

        assert_eq!(quiet_processor(&input, &output).run(), Some(0));
        assert_eq!(fs::read_to_string(&output).unwrap(), "old@run.com");
    }

    #[test]
    fn test_missing_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("missing.txt");
        let output = dir.path().join("after.txt");

        let processor = quiet_processor(&input, &output);
        let err = processor.process().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(err.user_message().contains("can't find"));

        assert_eq!(processor.run(), None);
        assert!(!output.exists());
    }

    #[test]
    fn test_failure_is_not_logged_above_info() {
        use log::{Level, LevelFilter, Log, Metadata, Record};
        use std::sync::Mutex;

        struct Capture(Mutex<Vec<(Level, String)>>);

        impl Log for Capture {
            fn enabled(&self, _: &Metadata) -> bool {
                true
            }

            fn log(&self, record: &Record) {
                self.0
                    .lock()
                    .unwrap()
                    .push((record.level(), record.args().to_string()));
            }

            fn flush(&self) {}
        }

        static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));
        log::set_logger(&CAPTURE).unwrap();
        log::set_max_level(LevelFilter::Trace);

        let dir = TempDir::new().unwrap();
        let input = dir.path().join("absent-input.txt");
        let output = dir.path().join("after.txt");
        assert_eq!(quiet_processor(&input, &output).run(), None);

        // The error block on stdout is the only place the failure is reported
        let records = CAPTURE.0.lock().unwrap();
        assert!(records.iter().all(|(level, _)| *level >= Level::Info));
        assert!(records
            .iter()
            .any(|(level, msg)| *level == Level::Debug && msg.contains("absent-input.txt")));
    }

    #[test]
    fn test_invalid_encoding() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("binary.txt");
        let output = dir.path().join("after.txt");
        fs::write(&input, b"hello \xC3\x28 a@b.com").unwrap();

        let processor = quiet_processor(&input, &output);
        let err = processor.process().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodingError);
        assert!(err.user_message().contains("encoding problem"));

        assert_eq!(processor.run(), None);
        assert!(!output.exists());
    }

    #[test]
    fn test_creates_output_directories() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("before.txt");
        let output = dir.path().join("a").join("b").join("c").join("after.txt");
        fs::write(&input, "reach me at me@site.dev").unwrap();

        assert_eq!(filter_emails_from_file(&input, &output), Some(1));
        assert_eq!(fs::read_to_string(&output).unwrap(), "me@site.dev");
    }

    #[test]
    fn test_input_is_directory() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("after.txt");

        let err = quiet_processor(dir.path(), &output).process().unwrap_err();
        assert_ne!(err.kind(), ErrorKind::FileNotFound);
        assert!(!output.exists());
    }

    #[test]
    fn test_run_email_filter_quiet() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("before.txt");
        let output = dir.path().join("after.txt");
        fs::write(&input, "x@y.io\ny@z.io\nx@y.io").unwrap();

        let mut config = ProcessorConfig::new(&input, &output);
        config.quiet = true;
        assert_eq!(run_email_filter(config), Some(2));
        assert_eq!(fs::read_to_string(&output).unwrap(), "x@y.io, y@z.io");
    }

    #[test]
    fn test_default_config_paths() {
        let config = ProcessorConfig::default();
        assert_eq!(config.input, PathBuf::from("input_files/beforetext.txt"));
        assert_eq!(config.output, PathBuf::from("output_files/aftertext.txt"));
    }

    #[cfg(unix)]
    mod permissions {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        /// Permission bits don't stop root
        fn bits_enforced(path: &Path) -> bool {
            fs::read(path).is_err()
        }

        #[test]
        fn test_unreadable_input() {
            let dir = TempDir::new().unwrap();
            let input = dir.path().join("locked.txt");
            let output = dir.path().join("after.txt");
            fs::write(&input, "a@b.com").unwrap();
            fs::set_permissions(&input, fs::Permissions::from_mode(0o000)).unwrap();

            if bits_enforced(&input) {
                let err = quiet_processor(&input, &output).process().unwrap_err();
                assert_eq!(err.kind(), ErrorKind::PermissionDenied);
                assert!(!output.exists());
            }

            fs::set_permissions(&input, fs::Permissions::from_mode(0o644)).unwrap();
        }

        #[test]
        fn test_unwritable_output_dir() {
            let dir = TempDir::new().unwrap();
            let input = dir.path().join("before.txt");
            let locked = dir.path().join("locked");
            fs::write(&input, "a@b.com").unwrap();
            fs::create_dir(&locked).unwrap();
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

            let probe = locked.join("probe");
            let enforced = fs::write(&probe, "").is_err();

            if enforced {
                let processor = quiet_processor(&input, &locked.join("after.txt"));
                let err = processor.process().unwrap_err();
                assert_eq!(err.kind(), ErrorKind::PermissionDenied);
                assert_eq!(processor.run(), None);
            }

            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }
}
