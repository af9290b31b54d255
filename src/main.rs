mod api;
mod app;
mod config;
mod error;
mod events;
mod logger;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use clap::{Arg, ArgMatches};
use config::Config;
use state::{FormRoute, StateError};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(base_url) = matches.value_of("base-url") {
        config.base_url = base_url.to_owned();
    }

    let route = form_route(&matches)?;
    if let Some(destination) = App::start(config, route).await? {
        println!("{}", destination);
    }
    Ok(())
}

/// Describe the command line interface.
///
fn cli() -> clap::App<'static, 'static> {
    clap::App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml (default: ~/.config/task-form)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("base-url")
                .long("base-url")
                .value_name("URL")
                .help("Backend API base URL, overriding the config file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("route")
                .short("r")
                .long("route")
                .value_name("PATH")
                .help("Form route, e.g. /projects/<id>/tasks/<task>/edit")
                .takes_value(true)
                .conflicts_with_all(&["project", "task"]),
        )
        .arg(
            Arg::with_name("project")
                .short("p")
                .long("project")
                .value_name("ID")
                .help("Create or edit inside this project; locks the project field")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("task")
                .short("t")
                .long("task")
                .value_name("ID")
                .help("Edit this task instead of creating one")
                .takes_value(true)
                .requires("project"),
        )
}

/// Determine the form route from the command line arguments.
///
fn form_route(matches: &ArgMatches) -> Result<FormRoute, StateError> {
    if let Some(path) = matches.value_of("route") {
        return path.parse();
    }
    Ok(match (matches.value_of("project"), matches.value_of("task")) {
        (Some(project), Some(task)) => FormRoute::edit(project, task),
        (project, _) => FormRoute::create(project),
    })
}
