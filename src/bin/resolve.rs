use clap::Parser;
use crapshoot::engine::Engine;
use crapshoot::engine::Request;
use crapshoot::engine::Resolution;

/// Resolve one craps roll from a JSON request.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the request JSON; reads stdin when omitted.
    #[arg(short, long)]
    request: Option<std::path::PathBuf>,
    /// Pretty-print the resolution.
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    crapshoot::log();
    let args = Args::parse();
    let json = match &args.request {
        Some(path) => std::fs::read_to_string(path)?,
        None => std::io::read_to_string(std::io::stdin())?,
    };
    let request: Request = serde_json::from_str(&json)?;
    match Engine::try_from(request).and_then(Engine::resolve) {
        Ok(resolution) => emit(&resolution, args.pretty)?,
        Err(error) => {
            log::error!("{}", error);
            let envelope = serde_json::json!({
                "success": false,
                "exception": { "type": error.kind(), "message": error.to_string() },
            });
            println!("{}", envelope);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn emit(resolution: &Resolution, pretty: bool) -> anyhow::Result<()> {
    match pretty {
        true => println!("{}", serde_json::to_string_pretty(resolution)?),
        false => println!("{}", serde_json::to_string(resolution)?),
    }
    Ok(())
}
