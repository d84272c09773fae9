use super::{print_json, today, App};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let app = App::open()?;
    print_json(&app.engine.snapshot(today()))
}
