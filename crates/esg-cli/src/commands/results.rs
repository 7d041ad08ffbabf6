use clap::Subcommand;
use esg_core::export;
use std::fs;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ResultsAction {
    /// Open an exported report (JSON or envelope)
    Open {
        /// Exported file
        file: PathBuf,
        /// Results-view passphrase
        #[arg(short, long)]
        password: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ResultsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ResultsAction::Open {
            file,
            password,
            json,
        } => {
            let text = fs::read_to_string(&file)?;
            let report = export::open(&text, &password)?;
            if json {
                println!("{}", report.to_json()?);
            } else {
                print!("{}", super::render_text(&report));
            }
        }
    }
    Ok(())
}
