use std::env;
use std::io::{self, Read, Write};

use log::error;

use recipe_stream::render::{render_html, render_text};
use recipe_stream::{
    accumulate, extract_title, parse_sections, GenerateError, Provider, RecipeGenerator,
    ReplaySource,
};

const USAGE: &str = "Usage:
  recipe-stream parse <file|->
  recipe-stream title <file|->
  recipe-stream render [--html] <file|->
  recipe-stream replay <file> [chunk-bytes]
  recipe-stream generate [--openai] <ingredients...>";

fn read_input(path: &str) -> io::Result<String> {
    if path == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&args).await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let command = args.first().ok_or(USAGE)?;
    let rest = &args[1..];

    match command.as_str() {
        "parse" => {
            let text = read_input(rest.first().ok_or(USAGE)?)?;
            println!("{}", serde_json::to_string_pretty(&parse_sections(&text))?);
        }
        "title" => {
            let text = read_input(rest.first().ok_or(USAGE)?)?;
            println!("{}", extract_title(&text));
        }
        "render" => {
            let html = rest.iter().any(|a| a == "--html");
            let path = rest.iter().find(|a| *a != "--html").ok_or(USAGE)?;
            let sections = parse_sections(&read_input(path)?);
            if html {
                print!("{}", render_html(&sections, true));
            } else {
                println!("{}", render_text(&sections, true));
            }
        }
        "replay" => {
            let text = read_input(rest.first().ok_or(USAGE)?)?;
            let chunk_bytes = match rest.get(1) {
                Some(n) => n.parse()?,
                None => 64,
            };
            let mut source = ReplaySource::from_text(&text, chunk_bytes);
            let outcome = accumulate(&mut source, |snapshot| {
                redraw(&render_text(&snapshot.sections(), snapshot.complete));
            })
            .await;
            if let Some(e) = outcome.error {
                return Err(e.into());
            }
        }
        "generate" => {
            let use_openai = rest.iter().any(|a| a == "--openai");
            let ingredients = rest
                .iter()
                .filter(|a| *a != "--openai")
                .cloned()
                .collect::<Vec<_>>()
                .join(" ");

            let mut builder = RecipeGenerator::builder().ingredients(ingredients);
            if use_openai {
                builder = builder.provider(Provider::OpenAI);
            }
            let result = builder
                .build_with(|snapshot| {
                    redraw(&render_text(&snapshot.sections(), snapshot.complete));
                })
                .await;
            match result {
                Ok(_) => {}
                Err(GenerateError::StreamInterrupted { partial, message }) => {
                    redraw(&render_text(&parse_sections(&partial), false));
                    return Err(message.into());
                }
                Err(e) => return Err(e.into()),
            }
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}

/// Clear the terminal and draw the current state of the recipe.
fn redraw(rendered: &str) {
    let mut stdout = io::stdout();
    let _ = writeln!(stdout, "\x1b[2J\x1b[H{}", rendered);
    let _ = stdout.flush();
}
