//! Line-oriented interactive session
//!
//! Each input line is one user action. Actions run to completion before the
//! next line is read; failures are reported and the session carries on.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::catalog::{CatalogFilter, PriceRange, StyleFilter, filter};
use crate::constants::report::ALL_STYLES;
use crate::report;
use crate::selection::ReportedPlacement;
use crate::session::Session;
use crate::types::{ArtworkId, Position};

/// Actions accepted by the session shell
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Browse the catalog with optional style and price filters
    Catalog(CatalogFilter),

    /// List style labels available for filtering
    Styles,

    Add(ArtworkId),

    /// Add at a pointer position (pointer space, not wall space)
    Drop { id: ArtworkId, x: f64, y: f64 },

    Remove(ArtworkId),

    Move { id: ArtworkId, x: f64, y: f64 },

    Wall { width: f64, height: f64 },

    Arrange,

    Clear,

    Show,

    Save(String),

    /// Restore by design id or name
    Load(String),

    Designs,

    /// Full position report as a JSON array of `{id, x, y}`
    Feedback(Vec<ReportedPlacement>),

    Help,

    Quit,
}

const HELP: &str = "\
Commands:
  catalog [style|All] [min max]   browse artworks
  styles                          list styles
  add <id>                        put an artwork on the wall
  drop <id> <x> <y>               add at a pointer position
  remove <id>                     take an artwork off the wall
  move <id> <x> <y>               reposition an artwork
  wall <width> <height>           resize the wall (inches)
  arrange                         auto-arrange on a grid
  clear                           empty the wall
  show                            describe the wall
  save <name>                     save the wall as a design
  load <name|id>                  restore a saved design
  designs                         list saved designs
  feedback <json>                 apply a position report
  quit                            leave
";

fn parse_number(word: Option<&str>, what: &str) -> Result<f64, String> {
    let word = word.ok_or_else(|| format!("missing {what}"))?;
    word.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("{what} must be a number, got '{word}'"))
}

fn parse_id(word: Option<&str>) -> Result<ArtworkId, String> {
    let word = word.ok_or_else(|| "missing artwork id".to_string())?;
    let Ok(id) = word.parse::<ArtworkId>();
    Ok(id)
}

fn parse_catalog_filter<'a>(words: impl Iterator<Item = &'a str>) -> Result<CatalogFilter, String> {
    let mut filter = CatalogFilter::default();
    let rest: Vec<&str> = words.collect();
    let prices = match rest.as_slice() {
        [] => return Ok(filter),
        [style] => {
            filter.style = StyleFilter::parse(style);
            return Ok(filter);
        }
        [min, max] => (*min, *max),
        [style, min, max] => {
            filter.style = StyleFilter::parse(style);
            (*min, *max)
        }
        _ => return Err("usage: catalog [style|All] [min max]".to_string()),
    };
    filter.price = PriceRange::new(
        parse_number(Some(prices.0), "minimum price")?,
        parse_number(Some(prices.1), "maximum price")?,
    );
    Ok(filter)
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let mut words = rest.split_whitespace();

        let command = match verb.to_ascii_lowercase().as_str() {
            "catalog" | "list" => Command::Catalog(parse_catalog_filter(words.by_ref())?),
            "styles" => Command::Styles,
            "add" => Command::Add(parse_id(words.next())?),
            "drop" => Command::Drop {
                id: parse_id(words.next())?,
                x: parse_number(words.next(), "x")?,
                y: parse_number(words.next(), "y")?,
            },
            "remove" | "rm" => Command::Remove(parse_id(words.next())?),
            "move" | "mv" => Command::Move {
                id: parse_id(words.next())?,
                x: parse_number(words.next(), "x")?,
                y: parse_number(words.next(), "y")?,
            },
            "wall" => Command::Wall {
                width: parse_number(words.next(), "width")?,
                height: parse_number(words.next(), "height")?,
            },
            "arrange" => Command::Arrange,
            "clear" => Command::Clear,
            "show" => Command::Show,
            // Names may contain spaces, so take the rest of the line
            "save" => Command::Save(rest.to_string()),
            "load" => {
                if rest.is_empty() {
                    return Err("usage: load <name|id>".to_string());
                }
                Command::Load(rest.to_string())
            }
            "designs" => Command::Designs,
            "feedback" => Command::Feedback(
                serde_json::from_str(rest).map_err(|e| format!("invalid position report: {e}"))?,
            ),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command '{other}', try 'help'")),
        };
        Ok(command)
    }
}

/// Outcome of one action
enum Flow {
    Continue,
    Stop,
}

fn execute(session: &mut Session, command: Command, out: &mut impl Write) -> Result<Flow> {
    debug!(command = ?command, "Executing command");
    let result = match command {
        Command::Catalog(filter) => session.catalog().map(|catalog| {
            report::catalog_listing(filter.apply(catalog.artworks()))
        }),
        Command::Styles => session.catalog().map(|catalog| {
            let mut labels = vec![ALL_STYLES.to_string()];
            labels.extend(filter::styles(catalog.artworks()));
            let mut text = labels.join(", ");
            if let Some(bounds) = filter::price_bounds(catalog.artworks()) {
                text.push_str(&format!(
                    "\nPrices: {} - {}",
                    report::format_amount(bounds.min),
                    report::format_amount(bounds.max)
                ));
            }
            text + "\n"
        }),
        Command::Add(id) => session.add(&id).map(|added| {
            if added {
                format!("Added {id}.\n")
            } else {
                format!("{id} is already on the wall.\n")
            }
        }),
        Command::Drop { id, x, y } => session.drop_at(&id, Position::new(x, y)).map(|added| {
            if added {
                format!("Dropped {id}.\n")
            } else {
                format!("{id} is already on the wall.\n")
            }
        }),
        Command::Remove(id) => session.remove(&id).map(|removed| {
            if removed {
                format!("Removed {id}.\n")
            } else {
                format!("{id} is not on the wall.\n")
            }
        }),
        Command::Move { id, x, y } => session.move_to(&id, x, y).map(|moved| match moved {
            Some(p) => format!("Moved {id} to ({}, {}).\n", p.x, p.y),
            None => format!("{id} is not on the wall.\n"),
        }),
        Command::Wall { width, height } => session
            .set_wall(width, height)
            .map(|()| format!("Wall is now {width}\" x {height}\".\n")),
        Command::Arrange => {
            session.auto_arrange();
            Ok(report::selection_summary(session.selection(), session.current_design()))
        }
        Command::Clear => {
            session.clear();
            Ok("Wall cleared.\n".to_string())
        }
        Command::Show => Ok(report::selection_summary(
            session.selection(),
            session.current_design(),
        )),
        Command::Save(name) => session
            .save(&name)
            .map(|design| format!("Design '{}' saved ({}).\n", design.name, design.id)),
        Command::Load(key) => session.load(&key).map(|design| {
            format!(
                "Loaded '{}'.\n{}",
                design.name,
                report::selection_summary(session.selection(), session.current_design())
            )
        }),
        Command::Designs => session
            .catalog()
            .map(|catalog| report::design_listing(catalog.designs())),
        Command::Feedback(reported) => session.apply_feedback(&reported).map(|o| {
            format!(
                "Applied report: {} added, {} removed, {} moved, {} ignored.\n",
                o.added, o.removed, o.moved, o.ignored
            )
        }),
        Command::Help => Ok(HELP.to_string()),
        Command::Quit => return Ok(Flow::Stop),
    };

    match result {
        Ok(text) => write!(out, "{text}")?,
        Err(e) => {
            warn!(error = %e, "Action failed");
            writeln!(out, "Error: {e}")?;
        }
    }
    Ok(Flow::Continue)
}

/// Run commands from `input` until it ends or `quit` is entered
pub fn run(
    session: &mut Session,
    input: impl BufRead,
    out: &mut impl Write,
    prompt: bool,
) -> Result<()> {
    if prompt {
        write!(out, "> ")?;
        out.flush()?;
    }
    for line in input.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            let flow = match line.parse::<Command>() {
                Ok(command) => execute(session, command, out)?,
                Err(message) => {
                    writeln!(out, "Error: {message}")?;
                    Flow::Continue
                }
            };
            if let Flow::Stop = flow {
                break;
            }
        }
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
    }
    Ok(())
}
