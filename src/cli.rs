use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "appcatfinder")]
#[command(about = "Looks up application category data for a spreadsheet of identifiers")]
#[command(version)]
pub struct Args {
    /// Create default configuration file at ./config/appcatfinder.toml
    #[arg(long)]
    pub init: bool,

    /// Input spreadsheet (.xlsx/.xls/.csv); queries are read from the first column
    #[arg(short, long, default_value = "Excel_Files/inputfile.xlsx")]
    pub input: String,

    /// Output file path (parent directories are created as needed)
    #[arg(short, long, default_value = "Excel_Files/output.xlsx")]
    pub output: String,

    /// Output format: 'xlsx' (default) or 'csv'
    #[arg(short = 'f', long, default_value = "xlsx")]
    pub output_format: String,

    /// Label for the query column: 'url' or 'application' (overrides config)
    #[arg(long, value_name = "LABEL")]
    pub query_label: Option<String>,

    /// Color only the category columns instead of the whole row (overrides config)
    #[arg(long)]
    pub color_categories_only: bool,

    /// Verbose logging (use -v for per-query detail, -vv for debug output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn validate(&self) -> Result<(), String> {
        if !["xlsx", "csv"].contains(&self.output_format.as_str()) {
            return Err("Output format must be 'xlsx' or 'csv'".to_string());
        }

        if let Some(label) = &self.query_label {
            if !["url", "application"].contains(&label.to_lowercase().as_str()) {
                return Err("Query label must be 'url' or 'application'".to_string());
            }
        }

        if self.input.trim().is_empty() {
            return Err("Input path cannot be empty".to_string());
        }
        if self.output.trim().is_empty() {
            return Err("Output path cannot be empty".to_string());
        }

        Ok(())
    }
}
