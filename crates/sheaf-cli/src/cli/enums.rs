use clap::ValueEnum;
use sheaf_config::OutputFormat;

/// Module format of the emitted artifacts
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Format {
    /// CommonJS (require/module.exports)
    #[value(name = "cjs")]
    Cjs,

    /// ECMAScript modules (import/export syntax)
    #[value(name = "esm")]
    Esm,

    /// Immediately Invoked Function Expression
    #[value(name = "iife")]
    Iife,

    /// Universal Module Definition
    #[value(name = "umd")]
    Umd,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Cjs => OutputFormat::Cjs,
            Format::Esm => OutputFormat::Esm,
            Format::Iife => OutputFormat::Iife,
            Format::Umd => OutputFormat::Umd,
        }
    }
}
