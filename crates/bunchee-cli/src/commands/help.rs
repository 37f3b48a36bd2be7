//! Usage text and version output.

use crate::logger::Logger;

/// Name of the installed binary.
pub const BIN_NAME: &str = "bunchee";

/// Version of this build.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// The usage block shown by `--help`.
pub fn help_text() -> String {
    format!(
        "\
Usage: {bin} [options] [source]

Options:
  -v, --version          output the version number
  -w, --watch            watch src files changes
  -m, --minify           compress output. default: false
  -o, --output <file>    specify output filename
  -f, --format <format>  type of output (esm, amd, cjs, iife, umd, system), default: esm
  -h, --help             output usage information
  --external <mod>       specify an external dependency, separate by comma
  --no-external          do not bundle external dependencies
  --target <target>      js features target: es versions. default: es2016
  --runtime <runtime>    build runtime (nodejs, browser). default: browser
  --env <env>            inlined process env variables, separate by comma. default: NODE_ENV
  --cwd <cwd>            specify current working directory
  --sourcemap            enable sourcemap generation, default: true
  --dts                  determine if need to generate types, default: false
",
        bin = BIN_NAME
    )
}

/// Print the usage block.
pub fn print_help(logger: &dyn Logger) {
    logger.log(&help_text());
}

/// Print the version string.
pub fn print_version(logger: &dyn Logger) {
    logger.log(version());
}
