use clap::Subcommand;

use super::App;

#[derive(Subcommand)]
pub enum CupAction {
    /// Print the cup size in ounces
    Get,
    /// Set the cup size in ounces
    Set { oz: i64 },
}

pub fn run(action: CupAction) -> Result<(), Box<dyn std::error::Error>> {
    let app = App::open()?;

    match action {
        CupAction::Get => println!("{}", app.intake.preferences().cup_size()),
        CupAction::Set { oz } => {
            app.intake.set_cup_size(oz)?;
            println!("ok");
        }
    }
    Ok(())
}
