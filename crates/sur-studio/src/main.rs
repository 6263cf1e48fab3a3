use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sur_engine::frame::IntervalHost;
use sur_engine::gl::headless::{HeadlessCanvas, HeadlessContext};
use sur_engine::logging::{LoggingConfig, init_logging};
use sur_engine::shader::{ParameterKind, ShaderRole, ShaderSet};
use sur_engine::{LoopControl, Sur, SurConfig, run_loop};

/// Inspect the shader sets declared in an HTML page.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// HTML file whose `<script>` elements carry the shaders.
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Run the frame loop for this many frames after compiling.
    #[arg(long, value_name = "N", default_value_t = 0)]
    frames: u64,

    /// Frame rate of the loop.
    #[arg(long, value_name = "HZ", default_value_t = IntervalHost::DEFAULT_RATE_HZ)]
    fps: f64,

    /// Acquire the context only; skip shader discovery and compilation.
    #[arg(long)]
    no_init: bool,
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    let args = Cli::parse();

    let html = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;

    let config = SurConfig::default().with_init_shaders(!args.no_init);
    let sur = Sur::from_markup(&HeadlessCanvas::new(), &html, config)
        .with_context(|| format!("failed to initialize shaders from {}", args.path.display()))?;

    println!("{}: {} shader set(s)", args.path.display(), sur.shader_sets().len());
    for (_, set) in sur.shader_sets().iter() {
        print_set(sur.gl(), set);
    }

    if args.frames > 0 {
        run_frames(args.frames, args.fps);
    }
    Ok(())
}

fn print_set(gl: &HeadlessContext, set: &ShaderSet<HeadlessContext>) {
    println!();
    println!("[{}]", set.name);
    for role in ShaderRole::ALL {
        let lines = set.source(role).map_or(0, |text| text.lines().count());
        println!("  {role:<9} {lines} line(s)");
    }

    let Some(program) = set.program else {
        println!("  (not linked)");
        return;
    };

    for kind in [ParameterKind::Attribute, ParameterKind::Uniform] {
        let mut names = kind.active_names(gl, program);
        names.sort();
        for name in names {
            let detail = match kind {
                ParameterKind::Attribute => set.attribute(&name).map(|loc| format!("location {loc}")),
                ParameterKind::Uniform => set.uniform(&name).map(|loc| format!("{loc:?}")),
            };
            println!("  {kind:<9} {name:<20} {}", detail.unwrap_or_else(|| "-".into()));
        }
    }
}

fn run_frames(frames: u64, fps: f64) {
    let mut host = IntervalHost::new(fps);
    let mut elapsed = 0.0f64;
    let mut count = 0u64;

    let ran = run_loop(&mut host, |dt| {
        elapsed += f64::from(dt);
        count += 1;
        log::trace!("frame {count}: dt={dt:.4}s");
        if count >= frames { LoopControl::Stop } else { LoopControl::Continue }
    });

    println!();
    println!(
        "ran {ran} frame(s) in {elapsed:.3}s (target {:.1} Hz, measured {:.1} Hz)",
        1.0 / host.interval().as_secs_f64(),
        if elapsed > 0.0 { ran as f64 / elapsed } else { 0.0 }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags_and_defaults() {
        let cli = Cli::try_parse_from(["sur-studio", "page.html"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("page.html"));
        assert_eq!((cli.frames, cli.fps, cli.no_init), (0, IntervalHost::DEFAULT_RATE_HZ, false));

        let cli = Cli::try_parse_from(["sur-studio", "--frames", "3", "--fps", "30", "--no-init", "p.html"]).unwrap();
        assert_eq!((cli.frames, cli.fps, cli.no_init), (3, 30.0, true));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Cli::try_parse_from(["sur-studio"]).is_err());
        assert!(Cli::try_parse_from(["sur-studio", "p.html", "--frames", "many"]).is_err());
        assert!(Cli::try_parse_from(["sur-studio", "p.html", "--bogus"]).is_err());
    }
}
