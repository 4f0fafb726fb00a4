use anyhow::Result;
use lazyhw::cli::{self, Command};
use lazyhw::config::Config;
use lazyhw::context::{AppContext, StandardContext};
use lazyhw::lazy::LazyCli;
use lazyhw::{logging, tui};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    let args = match cli::parse_args(env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}\n", e);
            cli::print_help("lazyhw");
            std::process::exit(2);
        }
    };

    if args.command == Command::Help {
        cli::print_help("lazyhw");
        return Ok(());
    }

    let ctx = StandardContext::new(args.root.clone());

    // A missing config file means defaults; a broken one is fatal.
    let config = match Config::load_or_default(&ctx) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration:\n{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&ctx, &config.log_level) {
        eprintln!("Warning: file logging disabled: {:#}", e);
    }
    logging::install_panic_hook(&ctx);
    if let Ok(path) = Config::get_path_string(&ctx) {
        log::debug!("Config path: {}", path);
    }

    match args.command {
        Command::List { json } => {
            let records = LazyCli::from_config(&config).assignment_todo().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                for r in &records {
                    println!("[{}] {}", r.identifier, r.title);
                    let course = r.course_label();
                    if !course.is_empty() {
                        println!("    Course:   {}", course);
                    }
                    if let Some(d) = &r.deadline_text {
                        println!("    Deadline: {}", d);
                    }
                    if let Some(rem) = &r.remaining_time_text {
                        println!("    Remaining: {}", rem);
                    }
                    if let Some(link) = &r.link {
                        println!("    Link:     {}", link);
                    }
                }
            }
            Ok(())
        }
        Command::ResourceId(name) => {
            match LazyCli::from_config(&config)
                .resolve_resource_id(&name)
                .await?
            {
                Some(id) => {
                    println!("{}", id);
                    Ok(())
                }
                None => {
                    eprintln!("No resource named '{}'", name);
                    std::process::exit(1);
                }
            }
        }
        Command::Tui => {
            log::debug!("Data dir: {:?}", ctx.get_data_dir().ok());
            tui::run(config).await
        }
        Command::Help => Ok(()),
    }
}
