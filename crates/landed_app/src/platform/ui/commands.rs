/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search { keyword: String, location: String },
    TopJobs,
    More,
    /// 1-based position in the rendered list.
    Open(usize),
    Close,
    Category(String),
    MinSalary(f64),
    ClearFilters,
    Export,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  search <keywords> [@ <location>]   new search
  top                                top jobs this week
  more                               load the next page
  open <n> / close                   show or hide listing n with AI insights
  category <label>                   filter by category (\"category All\" resets)
  salary <amount>                    minimum salary filter (0 disables)
  clear                              clear filters
  export                             write the filtered listings to CSV
  help / quit";

pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "search" | "s" => {
            let (keyword, location) = match rest.split_once('@') {
                Some((keyword, location)) => (keyword.trim(), location.trim()),
                None => (rest, ""),
            };
            Ok(Command::Search {
                keyword: keyword.to_string(),
                location: location.to_string(),
            })
        }
        "top" => Ok(Command::TopJobs),
        "more" | "m" => Ok(Command::More),
        "open" | "o" => rest
            .parse::<usize>()
            .ok()
            .filter(|index| *index > 0)
            .map(Command::Open)
            .ok_or_else(|| format!("Expected a listing number, got {rest:?}")),
        "close" => Ok(Command::Close),
        "category" | "cat" => {
            if rest.is_empty() {
                Err("Expected a category label".to_string())
            } else {
                Ok(Command::Category(rest.to_string()))
            }
        }
        "salary" => parse_amount(rest).map(Command::MinSalary),
        "clear" => Ok(Command::ClearFilters),
        "export" => Ok(Command::Export),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "" => Err("Type \"help\" for commands".to_string()),
        other => Err(format!("Unknown command {other:?}; type \"help\"")),
    }
}

// Accepts "35000", "35,000" and "£35,000".
fn parse_amount(text: &str) -> Result<f64, String> {
    let cleaned: String = text
        .chars()
        .filter(|ch| *ch != ',' && *ch != '£')
        .collect();
    if cleaned.is_empty() {
        return Ok(0.0);
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| format!("Expected an amount, got {text:?}"))
}
