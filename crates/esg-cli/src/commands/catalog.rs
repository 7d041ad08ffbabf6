use clap::Subcommand;
use esg_core::{builtin, domains, Domain};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List built-in domains
    List,
    /// Print a built-in catalog
    Show {
        /// Domain name (environmental, social, governance, digital-governance, comprehensive)
        domain: Domain,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CatalogAction::List => {
            for domain in domains() {
                let catalog = builtin(domain);
                println!("{:<20} {:>2} questions  {}", domain.as_str(), catalog.len(), catalog.title());
            }
        }
        CatalogAction::Show { domain, json } => {
            let catalog = builtin(domain);
            if json {
                println!("{}", catalog.to_json()?);
                return Ok(());
            }

            println!("{}", catalog.title());
            println!("{}", domain.description().trim_end());
            println!();
            for question in catalog.questions() {
                println!(
                    "{} [{}, weight {}]",
                    question.id,
                    question.kind.as_str(),
                    question.weight
                );
                println!("    {}", question.text);
                if !question.formula_inputs.is_empty() {
                    println!("    operands: {}", question.formula_inputs.join(", "));
                }
            }
        }
    }
    Ok(())
}
