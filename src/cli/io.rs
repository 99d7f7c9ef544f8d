//! Input and output for the CLI
//!
//! Input is read whole: the salt has to be known before the first block is
//! decrypted and the padded length before the last is encrypted. File output
//! is written atomically so a failed run never leaves a partial file behind.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::config::{Sink, Source};
use crate::error::{SaltedError, SaltedResult};

/// Read all input bytes
pub fn read_input(source: &Source) -> SaltedResult<Vec<u8>> {
    match source {
        Source::Stdin => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .map_err(|e| SaltedError::Io(format!("Unable to read input from stdin: {}", e)))?;
            Ok(buf)
        }
        Source::File(path) => fs::read(path).map_err(|e| {
            SaltedError::Io(format!("Unable to read input file {}: {}", path.display(), e))
        }),
    }
}

/// Write all output bytes
pub fn write_output(sink: &Sink, data: &[u8]) -> SaltedResult<()> {
    match sink {
        Sink::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(data)
                .and_then(|_| stdout.flush())
                .map_err(|e| SaltedError::Io(format!("Unable to write output data: {}", e)))
        }
        Sink::File(path) => write_atomic(path, data),
    }
}

/// Write bytes to a file atomically (write to temp, then rename)
pub fn write_atomic(path: &Path, data: &[u8]) -> SaltedResult<()> {
    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path).map_err(|e| {
        SaltedError::Io(format!("Unable to create output file {}: {}", path.display(), e))
    })?;

    let result = (|| {
        let mut writer = BufWriter::new(file);
        writer.write_all(data)?;
        writer.flush()?;
        // Sync to disk before rename
        writer.get_ref().sync_all()
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(SaltedError::Io(format!("Unable to write output data: {}", e)));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SaltedError::Io(format!("Unable to move output into {}: {}", path.display(), e))
    })?;

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
