use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use eyre::Result;

/// Write contents to a file on the disc, creating parent directories as needed.
///
/// ```no_run
/// use evlog_common::utils::io::file::write_file;
///
/// let path = "/tmp/test.txt";
/// let contents = "Hello, World!";
/// let result = write_file(path, contents);
/// ```
pub fn write_file(path_str: &str, contents: &str) -> Result<()> {
    let path = Path::new(path_str);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;

    Ok(())
}

/// Read contents from a file on the disc
///
/// ```no_run
/// use evlog_common::utils::io::file::read_file;
///
/// let path = "/tmp/test.txt";
/// let contents = read_file(path);
/// ```
pub fn read_file(path: &str) -> Result<String> {
    let mut file = File::open(Path::new(path))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let dir = std::env::temp_dir().join(format!("evlog-file-test-{}", std::process::id()));
        let path = dir.join("nested").join("out.txt");
        let path = path.to_str().expect("utf8 path");

        write_file(path, "hello").expect("failed to write file");
        assert_eq!(read_file(path).expect("failed to read file"), "hello");

        write_file(path, "replaced").expect("failed to overwrite file");
        assert_eq!(read_file(path).expect("failed to read file"), "replaced");

        let _ = std::fs::remove_file(path);
        assert!(read_file(path).is_err());

        let _ = std::fs::remove_dir_all(dir);
    }
}
