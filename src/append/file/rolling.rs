// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::cmp::Ordering;
use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use jiff::Zoned;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;

use crate::Error;
use crate::Trap;
use crate::append::file::clock::Clock;
use crate::append::file::rotation::Rotation;
use crate::trap::DefaultTrap;

/// A writer for rolling files.
///
/// The active file is always `<basedir>/<filename>`. Archives are named
/// `<filename>.<n>` for size based rolling (`.1` being the newest), or
/// `<filename>.<date>` for time based rolling.
#[derive(Debug)]
pub struct RollingFileWriter {
    state: State,
    writer: File,
}

impl Drop for RollingFileWriter {
    fn drop(&mut self) {
        if let Err(err) = self.writer.flush() {
            let err = Error::sink_write("failed to flush file writer on drop").with_source(err);
            self.state.trap.trap(&err);
        }
    }
}

impl RollingFileWriter {
    /// The path of the active log file.
    pub fn current_path(&self) -> PathBuf {
        self.state.current_filename()
    }
}

impl Write for RollingFileWriter {
    /// Writes `buf` to the active file, rolling over first if a period boundary has passed or
    /// if `buf` would bring a non-empty file to the size limit.
    ///
    /// A failed rollover is returned as an error and nothing is written. The next write tries
    /// again.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let now = self.state.clock.now();
        let writer = &mut self.writer;

        // state only advances once the rollover succeeded, so a failed one is retried
        if self.state.should_rollover_on_date(&now) {
            let period = self.state.this_date_timestamp.clone();
            self.state.refresh_writer(&period, writer).map_err(io::Error::other)?;
            self.state.current_filesize = 0;
            self.state.next_date_timestamp = self.state.rotation.next_date_timestamp(&now);
        }

        if self.state.should_rollover_on_size(buf.len()) {
            let period = self.state.this_date_timestamp.clone();
            self.state.refresh_writer(&period, writer).map_err(io::Error::other)?;
            self.state.current_filesize = 0;
        }

        self.state.this_date_timestamp = now;

        writer
            .write(buf)
            .inspect(|&n| self.state.current_filesize += n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// A builder for configuring [`RollingFileWriter`].
#[derive(Debug)]
pub struct RollingFileWriterBuilder {
    // required
    basedir: PathBuf,
    filename: String,

    // has default
    rotation: Rotation,
    max_size: Option<NonZeroUsize>,
    retention: Option<usize>,
    clock: Clock,
    trap: Box<dyn Trap>,
}

impl RollingFileWriterBuilder {
    /// Creates a new [`RollingFileWriterBuilder`].
    #[must_use]
    pub fn new(basedir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            basedir: basedir.into(),
            filename: filename.into(),
            rotation: Rotation::Never,
            max_size: None,
            retention: None,
            clock: Clock::System(TimeZone::system()),
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Set the trap for the rolling file writer.
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Set the rotation policy.
    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the number of archived files to keep. Unlimited if unset.
    #[must_use]
    pub fn retention(mut self, n: usize) -> Self {
        self.retention = Some(n);
        self
    }

    /// Set the maximum size of a log file in bytes.
    #[must_use]
    pub fn max_file_size(mut self, n: NonZeroUsize) -> Self {
        self.max_size = Some(n);
        self
    }

    /// Set the timezone that period boundaries and archive dates are computed in.
    #[must_use]
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.clock = Clock::System(tz);
        self
    }

    #[cfg(test)]
    pub(crate) fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the [`RollingFileWriter`].
    pub fn build(self) -> Result<RollingFileWriter, Error> {
        let Self {
            basedir,
            filename,
            rotation,
            max_size,
            retention,
            clock,
            trap,
        } = self;

        if filename.is_empty() {
            return Err(Error::sink_write("filename must not be empty"));
        }

        let (state, writer) =
            State::new(rotation, basedir, filename, max_size, retention, clock, trap)?;

        Ok(RollingFileWriter { state, writer })
    }
}

#[derive(Debug)]
struct LogFile {
    filepath: PathBuf,
    datetime: DateTime,
    count: usize,
}

#[derive(Debug)]
struct State {
    log_dir: PathBuf,
    log_filename: String,
    date_format: &'static str,
    rotation: Rotation,
    current_filesize: usize,
    this_date_timestamp: Zoned,
    next_date_timestamp: Option<usize>,
    max_size: Option<NonZeroUsize>,
    retention: Option<usize>,
    clock: Clock,
    trap: Box<dyn Trap>,
}

impl State {
    fn new(
        rotation: Rotation,
        dir: impl AsRef<Path>,
        log_filename: String,
        max_size: Option<NonZeroUsize>,
        retention: Option<usize>,
        clock: Clock,
        trap: Box<dyn Trap>,
    ) -> Result<(Self, File), Error> {
        let now = clock.now();
        let log_dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&log_dir).map_err(|err| {
            Error::filesystem("failed to create log directory")
                .with_context("path", log_dir.display())
                .with_source(err)
        })?;

        let mut state = State {
            log_dir,
            log_filename,
            date_format: rotation.date_format(),
            current_filesize: 0,
            next_date_timestamp: rotation.next_date_timestamp(&now),
            this_date_timestamp: now,
            rotation,
            max_size,
            retention,
            clock,
            trap,
        };

        // continue to use an existing log file
        let file = state.create_log_writer()?;
        let metadata = file.metadata().map_err(|err| {
            Error::sink_write("failed to stat current log")
                .with_context("path", state.current_filename().display())
                .with_source(err)
        })?;
        if metadata.len() > 0 {
            state.current_filesize = metadata.len() as usize;
            if let Ok(mtime) = metadata.modified() {
                if let Ok(mtime) = jiff::Timestamp::try_from(mtime) {
                    let mtime = mtime.to_zoned(state.clock.timezone());
                    state.next_date_timestamp = state.rotation.next_date_timestamp(&mtime);
                    state.this_date_timestamp = mtime;
                }
            }
        }

        Ok((state, file))
    }

    fn current_filename(&self) -> PathBuf {
        self.log_dir.join(&self.log_filename)
    }

    fn create_log_writer(&self) -> Result<File, Error> {
        let filename = self.current_filename();
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&filename)
            .map_err(|err| {
                Error::sink_write("failed to open log file")
                    .with_context("path", filename.display())
                    .with_source(err)
            })
    }

    fn truncate_log_writer(&self) -> Result<File, Error> {
        let filename = self.current_filename();
        File::create(&filename).map_err(|err| {
            Error::sink_write("failed to truncate log file")
                .with_context("path", filename.display())
                .with_source(err)
        })
    }

    fn numbered(&self, cnt: usize) -> PathBuf {
        let filename = &self.log_filename;
        self.log_dir.join(format!("{filename}.{cnt}"))
    }

    fn dated(&self, date: &Zoned, cnt: usize) -> PathBuf {
        let filename = &self.log_filename;
        let date = date.strftime(self.date_format);
        match cnt {
            0 => self.log_dir.join(format!("{filename}.{date}")),
            cnt => self.log_dir.join(format!("{filename}.{date}.{cnt}")),
        }
    }

    fn list_logfiles(&self) -> Result<Vec<LogFile>, Error> {
        let read_dir = fs::read_dir(&self.log_dir).map_err(|err| {
            Error::sink_write(format!(
                "failed to read log dir: {}",
                self.log_dir.display()
            ))
            .with_source(err)
        })?;

        let files = read_dir
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let filepath = entry.path();

                let metadata = entry.metadata().ok()?;
                // the appender only creates files, not directories or symlinks,
                if !metadata.is_file() {
                    return None;
                }

                let filename = entry.file_name();
                // if the filename is not a UTF-8 string, skip it.
                let filename = filename.to_str()?;
                let archive = filename
                    .strip_prefix(self.log_filename.as_str())?
                    .strip_prefix('.')?;

                if self.rotation == Rotation::Never {
                    let count = usize::from_str(archive).ok().filter(|&n| n > 0)?;
                    return Some(LogFile {
                        filepath,
                        datetime: DateTime::MAX,
                        count,
                    });
                }

                let (date, count) = match archive.split_once('.') {
                    None => (archive, 0),
                    Some((date, count)) => (date, usize::from_str(count).ok()?),
                };
                let datetime = DateTime::strptime(self.date_format, date).ok()?;

                Some(LogFile {
                    filepath,
                    datetime,
                    count,
                })
            })
            .collect::<Vec<_>>();

        Ok(files)
    }

    // oldest is the least
    fn compare_logfile(&self, a: &LogFile, b: &LogFile) -> Ordering {
        match self.rotation {
            Rotation::Never => b.count.cmp(&a.count),
            _ => a.datetime.cmp(&b.datetime).then(a.count.cmp(&b.count)),
        }
    }

    fn delete_oldest_logs(&self, retention: usize) -> Result<(), Error> {
        let mut files = self.list_logfiles()?;
        if files.len() <= retention {
            return Ok(());
        }

        files.sort_by(|a, b| self.compare_logfile(a, b));
        for file in files.iter().take(files.len() - retention) {
            let filepath = &file.filepath;
            fs::remove_file(filepath).map_err(|err| {
                Error::sink_write(format!("failed to remove old log: {}", filepath.display()))
                    .with_source(err)
            })?;
        }

        Ok(())
    }

    fn rename(&self, old: &Path, new: &Path) -> Result<(), Error> {
        fs::rename(old, new).map_err(|err| {
            Error::sink_write(format!("failed to rotate log: {}", old.display()))
                .with_context("target", new.display())
                .with_source(err)
        })
    }

    fn archive_by_size(&self) -> Result<(), Error> {
        let limit = self.retention.unwrap_or(usize::MAX);

        let mut renames = vec![];
        for i in 1..limit {
            let filepath = self.numbered(i);
            if fs::exists(&filepath).is_ok_and(|ok| ok) {
                renames.push((filepath, self.numbered(i + 1)));
            } else {
                break;
            }
        }

        for (old, new) in renames.iter().rev() {
            self.rename(old, new)?;
        }

        self.archive_current(&self.numbered(1))
    }

    fn archive_by_date(&self, period: &Zoned) -> Result<(), Error> {
        let mut cnt = 0;
        let mut archive = self.dated(period, cnt);
        while fs::exists(&archive).is_ok_and(|ok| ok) {
            cnt += 1;
            archive = self.dated(period, cnt);
        }

        self.archive_current(&archive)
    }

    // the active file may be gone, e.g. when the log dir was removed and recreated
    fn archive_current(&self, archive: &Path) -> Result<(), Error> {
        let current = self.current_filename();
        if fs::exists(&current).is_ok_and(|ok| ok) {
            self.rename(&current, archive)
        } else {
            Ok(())
        }
    }

    fn rotate_log_writer(&self, period: &Zoned) -> Result<File, Error> {
        if self.retention == Some(0) {
            return self.truncate_log_writer();
        }

        match self.rotation {
            Rotation::Never => self.archive_by_size()?,
            _ => self.archive_by_date(period)?,
        }

        if let Some(retention) = self.retention {
            if let Err(err) = self.delete_oldest_logs(retention) {
                let err = Error::sink_write("failed to delete oldest logs").with_source(err);
                self.trap.trap(&err);
            }
        }

        self.create_log_writer()
    }

    fn refresh_writer(&self, period: &Zoned, file: &mut File) -> Result<(), Error> {
        if let Err(err) = file.flush() {
            let err = Error::sink_write("failed to flush previous writer").with_source(err);
            self.trap.trap(&err);
        }

        *file = self.rotate_log_writer(period)?;
        Ok(())
    }

    fn should_rollover_on_date(&self, date: &Zoned) -> bool {
        self.next_date_timestamp
            .is_some_and(|ts| date.timestamp().as_millisecond() as usize >= ts)
    }

    fn should_rollover_on_size(&self, incoming: usize) -> bool {
        self.max_size.is_some_and(|n| {
            self.current_filesize > 0 && self.current_filesize + incoming >= n.get()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::min;
    use std::fs;
    use std::io::Write;
    use std::num::NonZeroUsize;
    use std::str::FromStr;

    use jiff::Span;
    use jiff::Zoned;
    use rand::Rng;
    use rand::distr::Alphanumeric;
    use tempfile::TempDir;

    use crate::append::file::clock::Clock;
    use crate::append::file::clock::ManualClock;
    use crate::append::file::rolling::RollingFileWriterBuilder;
    use crate::append::file::rotation::Rotation;
    use crate::trap::BestEffortTrap;

    fn file_names(dir: &TempDir) -> Vec<String> {
        let mut names = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    #[test]
    fn test_file_rolling_via_file_size() {
        test_file_rolling_for_specific_file_size(3, 1000);
        test_file_rolling_for_specific_file_size(3, 10000);
        test_file_rolling_for_specific_file_size(10, 8888);
        test_file_rolling_for_specific_file_size(20, 6666);
    }

    fn test_file_rolling_for_specific_file_size(retention: usize, max_size: usize) {
        let max_size = NonZeroUsize::new(max_size).unwrap();
        let temp_dir = TempDir::new().unwrap();

        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "test.log")
            .retention(retention)
            .max_file_size(max_size)
            .build()
            .unwrap();

        for _ in 1..=(retention * 2) {
            let mut written = 0;
            while written < max_size.get() {
                let rand_str = generate_random_string();
                written += rand_str.len();
                assert_eq!(writer.write(rand_str.as_bytes()).unwrap(), rand_str.len());
            }
            writer.flush().unwrap();

            let current_len = fs::metadata(writer.current_path()).unwrap().len();
            assert_eq!(writer.state.current_filesize as u64, current_len);
            // the active file plus at most `retention` archives, none reaching the limit
            let entries = fs::read_dir(&writer.state.log_dir)
                .unwrap()
                .map(|entry| entry.unwrap())
                .collect::<Vec<_>>();
            assert!(entries.len() <= retention + 1);
            for entry in entries {
                assert!(entry.metadata().unwrap().len() < max_size.get() as u64);
            }
        }

        assert_eq!(
            fs::read_dir(&writer.state.log_dir).unwrap().count(),
            retention + 1
        );
    }

    #[test]
    fn test_size_backups_are_numbered_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "app.log")
            .retention(2)
            .max_file_size(NonZeroUsize::new(4).unwrap())
            .build()
            .unwrap();

        for payload in ["aaaa", "bbbb", "cccc", "dddd"] {
            writer.write_all(payload.as_bytes()).unwrap();
        }
        writer.flush().unwrap();

        assert_eq!(file_names(&temp_dir), ["app.log", "app.log.1", "app.log.2"]);
        let read = |name: &str| fs::read_to_string(temp_dir.path().join(name)).unwrap();
        assert_eq!(read("app.log"), "dddd");
        assert_eq!(read("app.log.1"), "cccc");
        assert_eq!(read("app.log.2"), "bbbb");
    }

    #[test]
    fn test_below_max_size_keeps_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "app.log")
            .retention(10)
            .max_file_size(NonZeroUsize::new(1024).unwrap())
            .build()
            .unwrap();

        for _ in 0..10 {
            writer.write_all(b"0123456789\n").unwrap();
        }
        writer.flush().unwrap();

        assert_eq!(file_names(&temp_dir), ["app.log"]);
    }

    #[test]
    fn test_zero_retention_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "app.log")
            .retention(0)
            .max_file_size(NonZeroUsize::new(4).unwrap())
            .build()
            .unwrap();

        writer.write_all(b"aaaa").unwrap();
        writer.write_all(b"bb").unwrap();
        writer.flush().unwrap();

        assert_eq!(file_names(&temp_dir), ["app.log"]);
        let content = fs::read_to_string(temp_dir.path().join("app.log")).unwrap();
        assert_eq!(content, "bb");
    }

    #[test]
    fn test_reopen_continues_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("app.log"), "abc").unwrap();

        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "app.log")
            .max_file_size(NonZeroUsize::new(5).unwrap())
            .build()
            .unwrap();
        assert_eq!(writer.state.current_filesize, 3);

        writer.write_all(b"de").unwrap();
        writer.write_all(b"f").unwrap();
        writer.flush().unwrap();

        let read = |name: &str| fs::read_to_string(temp_dir.path().join(name)).unwrap();
        assert_eq!(read("app.log.1"), "abc");
        assert_eq!(read("app.log"), "def");
    }

    #[test]
    fn test_rolls_before_reaching_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "app.log")
            .retention(3)
            .max_file_size(NonZeroUsize::new(10).unwrap())
            .build()
            .unwrap();

        // an oversized line still lands whole in an empty file
        writer.write_all(b"0123456789abc").unwrap();
        writer.write_all(b"12345").unwrap();
        writer.write_all(b"6789").unwrap();
        writer.write_all(b"x").unwrap();
        writer.flush().unwrap();

        let read = |name: &str| fs::read_to_string(temp_dir.path().join(name)).unwrap();
        assert_eq!(file_names(&temp_dir), ["app.log", "app.log.1", "app.log.2"]);
        assert_eq!(read("app.log.2"), "0123456789abc");
        assert_eq!(read("app.log.1"), "123456789");
        assert_eq!(read("app.log"), "x");
    }

    #[test]
    fn test_failed_rollover_is_retried() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs");
        let mut writer = RollingFileWriterBuilder::new(&log_dir, "app.log")
            .retention(2)
            .max_file_size(NonZeroUsize::new(4).unwrap())
            .trap(BestEffortTrap::default())
            .build()
            .unwrap();

        writer.write_all(b"aaaa").unwrap();
        fs::remove_dir_all(&log_dir).unwrap();
        assert!(writer.write_all(b"bbbb").is_err());
        assert!(writer.write_all(b"cccc").is_err());

        fs::create_dir_all(&log_dir).unwrap();
        writer.write_all(b"dddd").unwrap();
        writer.flush().unwrap();

        let names = fs::read_dir(&log_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(names, ["app.log"]);
        assert_eq!(fs::read_to_string(log_dir.join("app.log")).unwrap(), "dddd");
        assert_eq!(writer.state.current_filesize, 4);
    }

    #[test]
    fn test_file_rolling_via_time_rotation() {
        test_file_rolling_for_specific_time_rotation(
            Rotation::Hourly,
            Span::new().hours(1),
            Span::new().minutes(1),
        );
        test_file_rolling_for_specific_time_rotation(
            Rotation::Daily,
            Span::new().days(1),
            Span::new().hours(1),
        );
    }

    fn test_file_rolling_for_specific_time_rotation(
        rotation: Rotation,
        rotation_duration: Span,
        write_interval: Span,
    ) {
        let retention = 10;
        let temp_dir = TempDir::new().unwrap();

        let start_time = Zoned::from_str("2024-08-10T00:00:00[UTC]").unwrap();
        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "test.log")
            .rotation(rotation)
            .retention(retention)
            .clock(Clock::Manual(ManualClock::new(start_time.clone())))
            .build()
            .unwrap();

        let mut cur_time = start_time;

        for i in 1..=(retention * 2) {
            let mut expected_file_size = 0;
            let end_time = &cur_time + rotation_duration;
            while cur_time < end_time {
                writer.state.clock.set_now(cur_time.clone());

                let rand_str = generate_random_string();
                expected_file_size += rand_str.len();

                assert_eq!(writer.write(rand_str.as_bytes()).unwrap(), rand_str.len());
                assert_eq!(writer.state.current_filesize, expected_file_size);

                cur_time += write_interval;
            }

            writer.flush().unwrap();
            assert_eq!(
                fs::read_dir(&writer.state.log_dir).unwrap().count(),
                min(i, retention + 1)
            );
        }
    }

    #[test]
    fn test_daily_archives_are_named_by_closed_period() {
        let temp_dir = TempDir::new().unwrap();
        let start_time = Zoned::from_str("2024-08-10T23:30:00[UTC]").unwrap();
        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "svc-debug.log")
            .rotation(Rotation::Daily)
            .retention(2)
            .clock(Clock::Manual(ManualClock::new(start_time)))
            .build()
            .unwrap();

        for now in [
            "2024-08-10T23:59:59[UTC]",
            "2024-08-11T00:00:00[UTC]",
            "2024-08-12T08:00:00[UTC]",
            "2024-08-13T08:00:00[UTC]",
        ] {
            writer.state.clock.set_now(Zoned::from_str(now).unwrap());
            writer.write_all(now.as_bytes()).unwrap();
        }
        writer.flush().unwrap();

        assert_eq!(
            file_names(&temp_dir),
            [
                "svc-debug.log",
                "svc-debug.log.2024-08-11",
                "svc-debug.log.2024-08-12",
            ]
        );
    }

    #[test]
    fn test_hourly_archive_names() {
        let temp_dir = TempDir::new().unwrap();
        let start_time = Zoned::from_str("2024-08-10T17:05:00[UTC]").unwrap();
        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "svc.log")
            .rotation(Rotation::Hourly)
            .retention(5)
            .clock(Clock::Manual(ManualClock::new(start_time)))
            .build()
            .unwrap();

        writer.write_all(b"first").unwrap();
        writer
            .state
            .clock
            .set_now(Zoned::from_str("2024-08-10T18:00:01[UTC]").unwrap());
        writer.write_all(b"second").unwrap();
        writer.flush().unwrap();

        assert_eq!(file_names(&temp_dir), ["svc.log", "svc.log.2024-08-10_17"]);
    }

    #[test]
    fn test_unrelated_files_are_never_deleted() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("svc-debug.log"), "debug").unwrap();
        fs::write(temp_dir.path().join("svc.log.notes"), "notes").unwrap();

        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "svc.log")
            .retention(1)
            .max_file_size(NonZeroUsize::new(1).unwrap())
            .build()
            .unwrap();
        for _ in 0..5 {
            writer.write_all(b"x").unwrap();
        }
        writer.flush().unwrap();

        assert_eq!(
            file_names(&temp_dir),
            ["svc-debug.log", "svc.log", "svc.log.1", "svc.log.notes"]
        );
    }

    #[test]
    fn test_file_rolling_via_file_size_and_time_rotation() {
        let retention = 10;
        let file_size = NonZeroUsize::new(500).unwrap();
        let temp_dir = TempDir::new().unwrap();

        let start_time = Zoned::from_str("2024-08-10T00:00:00[UTC]").unwrap();
        let mut writer = RollingFileWriterBuilder::new(temp_dir.as_ref(), "test.log")
            .rotation(Rotation::Hourly)
            .retention(retention)
            .max_file_size(file_size)
            .clock(Clock::Manual(ManualClock::new(start_time.clone())))
            .build()
            .unwrap();

        let mut cur_time = start_time;
        for _ in 0..2000 {
            writer.state.clock.set_now(cur_time.clone());
            writer.write_all(generate_random_string().as_bytes()).unwrap();
            cur_time += Span::new().minutes(1);
        }
        writer.flush().unwrap();

        assert!(fs::read_dir(&writer.state.log_dir).unwrap().count() <= retention + 1);
    }

    fn generate_random_string() -> String {
        let mut rng = rand::rng();
        let len = rng.random_range(50..=100);
        let random_string: String = std::iter::repeat(())
            .map(|()| rng.sample(Alphanumeric))
            .map(char::from)
            .take(len)
            .collect();

        random_string
    }
}
