#[cfg(test)]
mod tests {
    use crate::cli::{parse_args, Format, ParsedOptions, Runtime, Toggle};
    use crate::config::{resolve_path, split_list, BuildConfig, External, DEFAULT_ENV};
    use std::path::{Path, PathBuf};

    fn resolve(args: &[&str]) -> BuildConfig {
        let options = parse_args(args.iter().copied()).unwrap();
        BuildConfig::resolve(&options, Path::new("/work"))
    }

    #[test]
    fn test_defaults() {
        let config = resolve(&[]);

        assert_eq!(config.cwd, PathBuf::from("/work"));
        assert_eq!(config.file, None);
        assert_eq!(config.format, None);
        assert_eq!(config.target, None);
        assert_eq!(config.target(), "es2016");
        assert_eq!(config.runtime, None);
        assert_eq!(config.external, External::Only(vec![]));
        assert_eq!(config.env, vec![DEFAULT_ENV.to_string()]);
        assert!(config.sourcemap, "sourcemaps are on by default");
        assert!(!config.watch);
        assert!(!config.minify);
        assert!(!config.dts);
    }

    #[test]
    fn test_output_resolved_against_cwd_flag() {
        let config = resolve(&["--output", "out/bundle.js", "--cwd", "/proj"]);
        assert_eq!(config.cwd, PathBuf::from("/proj"));
        assert_eq!(config.file, Some(PathBuf::from("/proj/out/bundle.js")));
    }

    #[test]
    fn test_relative_cwd_resolved_against_process_dir() {
        let config = resolve(&["--cwd", "packages/ui", "-o", "../dist/ui.js"]);
        assert_eq!(config.cwd, PathBuf::from("/work/packages/ui"));
        assert_eq!(config.file, Some(PathBuf::from("/work/packages/dist/ui.js")));
    }

    #[test]
    fn test_absolute_output_is_kept() {
        let config = resolve(&["-o", "/tmp/out.js"]);
        assert_eq!(config.file, Some(PathBuf::from("/tmp/out.js")));
    }

    #[test]
    fn test_external_list() {
        let config = resolve(&["--external", "a,b"]);
        assert_eq!(
            config.external,
            External::Only(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_no_external_wins() {
        let config = resolve(&["--no-external", "--external", "a,b,c"]);
        assert_eq!(config.external, External::All);
    }

    #[test]
    fn test_env_list() {
        let config = resolve(&["--env", "NODE_ENV,FOO"]);
        assert_eq!(config.env, vec!["NODE_ENV".to_string(), "FOO".to_string()]);
    }

    #[test]
    fn test_sourcemap_three_states() {
        let mut options = ParsedOptions::default();
        let cwd = Path::new("/work");

        options.sourcemap = Toggle::Unset;
        assert!(BuildConfig::resolve(&options, cwd).sourcemap);

        options.sourcemap = Toggle::On;
        assert!(BuildConfig::resolve(&options, cwd).sourcemap);

        options.sourcemap = Toggle::Off;
        assert!(!BuildConfig::resolve(&options, cwd).sourcemap);
    }

    #[test]
    fn test_passthrough_flags() {
        let config = resolve(&[
            "-w", "-m", "--dts", "-f", "cjs", "--runtime", "nodejs", "--target", "esnext",
        ]);
        assert!(config.watch);
        assert!(config.minify);
        assert!(config.dts);
        assert_eq!(config.format, Some(Format::Cjs));
        assert_eq!(config.runtime, Some(Runtime::Nodejs));
        assert_eq!(config.target(), "esnext");
    }

    #[test]
    fn test_resolve_entry() {
        let config = resolve(&["--cwd", "/proj"]);
        assert_eq!(
            config.resolve_entry(Some("./src/index.ts")),
            PathBuf::from("/proj/src/index.ts")
        );
        assert_eq!(config.resolve_entry(None), PathBuf::new());
    }

    #[test]
    fn test_resolve_path_normalises() {
        assert_eq!(
            resolve_path(Path::new("a/./b/../c.js"), Path::new("/base")),
            PathBuf::from("/base/a/c.js")
        );
    }

    #[test]
    fn test_split_list_drops_empty_segments() {
        assert_eq!(split_list("a,,b,"), vec!["a".to_string(), "b".to_string()]);
        assert!(split_list("").is_empty());
    }
}
