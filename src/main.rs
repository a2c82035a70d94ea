use orbit_viewer::{
    config::{Command, USAGE, ViewerConfig},
    flow,
};

fn main() -> anyhow::Result<()> {
    flow::init_logging();

    let config = match ViewerConfig::from_args(std::env::args().skip(1))? {
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Command::Run(config) => config,
    };

    // Nothing to show without a model, so a failed import ends the program here
    let scene = flow::load_model(&config)?;

    flow::run(config, scene)
}
