use nbv_cli::{
    command, render_bump, render_bump_failure, render_rebuild, run_bump, run_rebuild, to_json,
    GlobalOptions,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    tracing::debug!("nbv v{}", nbv_core::VERSION);
}

fn main() {
    let matches = command().get_matches();

    match matches.subcommand() {
        Some(("rebuild", args)) => {
            let options = GlobalOptions::from_matches(args);
            init_tracing(options.log_level());
            let dry_run = args.get_flag("dry-run");

            let output = run_rebuild(&options, dry_run).and_then(|report| {
                if options.json {
                    to_json(&report)
                } else {
                    Ok(render_rebuild(&report))
                }
            });
            match output {
                Ok(text) => {
                    print!("{text}");
                    if options.json {
                        println!();
                    }
                }
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    std::process::exit(1);
                }
            }
        }
        Some(("bump", args)) => {
            let options = GlobalOptions::from_matches(args);
            init_tracing(options.log_level());

            match run_bump(&options) {
                Ok(report) => {
                    if options.json {
                        match to_json(&report) {
                            Ok(json) => println!("{json}"),
                            Err(e) => {
                                eprintln!("Error: {e:#}");
                                std::process::exit(1);
                            }
                        }
                    } else {
                        print!("{}", render_bump(&report));
                    }
                }
                Err(e) => {
                    println!("{}", render_bump_failure(&e));
                    std::process::exit(1);
                }
            }
        }
        _ => {}
    }
}
