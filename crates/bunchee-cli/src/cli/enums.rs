use clap::ValueEnum;
use std::fmt;

/// Output module format
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum Format {
    /// ECMAScript modules (import/export syntax)
    #[default]
    #[value(name = "esm")]
    Esm,

    /// Asynchronous Module Definition (RequireJS loaders)
    #[value(name = "amd")]
    Amd,

    /// CommonJS modules (require/module.exports)
    #[value(name = "cjs")]
    Cjs,

    /// Immediately Invoked Function Expression for script tags
    #[value(name = "iife")]
    Iife,

    /// Universal Module Definition (AMD, CommonJS and a global at once)
    #[value(name = "umd")]
    Umd,

    /// SystemJS register format
    #[value(name = "system")]
    System,
}

/// Runtime the bundle is built for
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum Runtime {
    /// Browser environment
    ///
    /// Node.js built-ins are not available and `browser` package fields win
    /// during resolution.
    #[default]
    #[value(name = "browser")]
    Browser,

    /// Node.js environment
    #[value(name = "nodejs")]
    Nodejs,
}

macro_rules! display_as_value_name {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    match self.to_possible_value() {
                        Some(value) => f.write_str(value.get_name()),
                        None => write!(f, "{:?}", self),
                    }
                }
            }
        )*
    };
}

display_as_value_name!(Format, Runtime);
