use std::path::Path;

/// build the path a report is written to. `output` is the directory given with `--output`,
/// `name` the optional prefix given with `--name`:
/// - if `name` is empty, return `{output}/logs.json`
/// - otherwise, return `{output}/{name}-logs.json`
pub(crate) fn build_output_path(output: &str, name: &str, filename: &str) -> String {
    let filename =
        if name.is_empty() { filename.to_string() } else { format!("{}-{}", name, filename) };

    Path::new(output).join(filename).to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_unnamed() {
        assert_eq!(build_output_path("/some_dir", "", "logs.json"), "/some_dir/logs.json");
    }

    #[test]
    fn test_output_named() {
        assert_eq!(
            build_output_path("/some_dir/", "store", "logs.json"),
            "/some_dir/store-logs.json"
        );
    }

    #[test]
    fn test_output_relative() {
        assert_eq!(build_output_path("out", "", "logs.json"), "out/logs.json");
    }
}
