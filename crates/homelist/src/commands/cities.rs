use tabled::Tabled;

use homelist_core::City;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct CityRow {
    #[tabled(rename = "City")]
    name: &'static str,
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let cities = City::all();
    let out = output::render_list(
        global.output,
        &cities,
        |c| CityRow { name: c.as_str() },
        |c| c.as_str().to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
