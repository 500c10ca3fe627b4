// main.rs - Launcher: pick a program by name and run it in a window

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use conway::LifeProgram;
use eframe::egui;
use program::{Harness, HarnessConfig, Logger, Options, Program};

mod exit_codes;
mod logging;
mod ui;

type Factory = fn(&Options, &Logger) -> Box<dyn Program>;

/// Programs the launcher knows by name.
const PROGRAMS: &[(&str, Factory)] = &[("conway", conway_program)];

fn conway_program(options: &Options, logger: &Logger) -> Box<dyn Program> {
    Box::new(LifeProgram::from_options(options, logger))
}

fn lookup(name: &str) -> Option<Factory> {
    PROGRAMS.iter().find(|(known, _)| *known == name).map(|&(_, factory)| factory)
}

#[derive(Parser, Debug)]
#[command(name = "window", version, about = "Graphical programs on a fixed-rate update/draw loop")]
struct Cli {
    /// The program to run.
    #[arg(short, long)]
    program: String,

    /// The title of the window.
    #[arg(short, long, default_value = "window")]
    title: String,

    /// The width of the window.
    #[arg(short, long, default_value_t = 800)]
    width: u32,

    /// The height of the window.
    #[arg(short = 'l', long, default_value_t = 600)]
    height: u32,

    /// Options passed to the program.
    #[arg(short, long, value_name = "KEY=VAL", num_args = 1.., value_parser = program::options::parse_pair)]
    options: Vec<(String, String)>,
}

impl Cli {
    /// The default title is the capitalized program name.
    fn window_title(&self) -> String {
        if self.title != "window" {
            return self.title.clone();
        }
        let mut chars = self.program.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => self.title.clone(),
        }
    }
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::FAILURE);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init();

    let Some(factory) = lookup(&cli.program) else {
        eprintln!("Program not found: {}.", cli.program);
        return Ok(exit_codes::FAILURE);
    };
    let title = cli.window_title();
    println!("Running {}...", cli.program);

    let options: Options = cli.options.iter().cloned().collect();
    let config = HarnessConfig::from_options(&options);
    let program = factory(&options, &config.logger("Program"));
    let mut harness = Harness::new(program, config);
    harness.start()?;

    let exit = ui::ExitState::new();
    let handler = exit.clone();
    ctrlc::set_handler(move || handler.interrupt()).context("installing Ctrl-C handler")?;

    let app = ui::HarnessApp::new(harness, cli.program.clone(), exit.clone());
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([cli.width as f32, cli.height as f32])
            .with_title(title.clone()),
        ..Default::default()
    };

    eframe::run_native(&title, native_options, Box::new(|_cc| Box::new(app)))
        .map_err(|err| anyhow!("window backend failed: {err}"))?;

    let code = exit.code();
    if code == exit_codes::OK {
        println!("Exiting program: {}", cli.program);
    }
    Ok(code)
}
