use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "streamzip")]
#[command(version)]
#[command(about = "A streaming ZIP extractor driven by local file headers", long_about = None)]
#[command(after_help = "Examples:\n  \
  streamzip data.zip             extract data.zip into the current directory\n  \
  streamzip -d out data.zip      extract data.zip into out/\n  \
  streamzip -l data.zip          list entries without extracting")]
pub struct Cli {
    /// ZIP file path
    #[arg(value_name = "FILE")]
    pub file: String,

    /// List entries instead of extracting
    #[arg(short = 'l')]
    pub list: bool,

    /// Extract files into exdir
    #[arg(short = 'd', value_name = "DIR")]
    pub extract_dir: Option<String>,

    /// Quiet mode (suppress per-entry messages)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }
}
