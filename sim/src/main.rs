
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use clap::{Arg, ArgMatches, App, SubCommand};
use log::info;

use automata::direct::{pos_set_label, Annotations, FollowTable};
use automata::{
    compile_with, to_direct_dfa, to_thompson_automaton,
    Automaton, Dialect, Options, ParseTree,
};

fn read_file(name: &str) -> Result<String, String> {
    let path = Path::new(name);
    let display = path.display();

    let mut file = match File::open(&path) {
        Err(why) => Err(format!("Couldn't open {} : {}", display, why)),
        Ok(file) => Ok(file),
    }?;

    let mut s = String::new();
    file.read_to_string(&mut s).map_err(|e| e.to_string())?;

    Ok(s)
}

fn write_file(name: &str, contents: &str) -> Result<(), String> {
    let path = Path::new(name);
    let display = path.display();

    let mut file = match File::create(&path) {
        Err(why) => Err(format!("Couldn't open {} : {}", display, why)),
        Ok(file) => Ok(file),
    }?;

    match file.write_fmt(format_args!("{}", contents)) {
        Ok(()) => Ok(()),
        Err(e) => Err(format!("{}", e)),
    }?;

    Ok(())
}

fn options(matches: &ArgMatches) -> Result<Options, String> {
    let dialect = if matches.is_present("parallel") {
        Dialect::Parallel
    } else {
        Dialect::Plain
    };
    let mut options = Options::new(dialect);

    if let Some(depth) = matches.value_of("max-depth") {
        let depth = depth.parse::<usize>()
            .map_err(|_| format!("Invalid nesting depth \"{}\".", depth))?;
        options = options.max_depth(depth);
    }

    Ok(options)
}

fn parse(matches: &ArgMatches) -> Result<ParseTree, String> {
    let pattern = matches.value_of("pattern").unwrap();
    Ok(compile_with(pattern, options(matches)?)?)
}

fn print_tree(tree: &ParseTree) {
    println!("{}", tree);

    let annotations = Annotations::new(tree);
    println!("firstpos: {}", pos_set_label(annotations.first(tree.root())));
    println!("lastpos: {}", pos_set_label(annotations.last(tree.root())));

    if tree.has_shuffle() {
        println!("No followpos across an interleave.");
        return
    }

    let follow = FollowTable::new(tree, &annotations);
    println!("followpos:");
    for p in 1..=tree.end_position() {
        println!("    {} ({}): {}", p, tree.symbol_at(p), pos_set_label(follow.get(p)));
    }
}

fn describe(description: String, output: Option<&str>) -> Result<(), String> {
    match output {
        Some(file_name) => {
            write_file(file_name, &description)?;
            info!("wrote {}", file_name);
        },
        None => print!("{}", description),
    }

    Ok(())
}

fn verdict(accepted: bool) -> &'static str {
    if accepted {"accepted"} else {"rejected"}
}

fn run(tree: &ParseTree, words: &[&str]) {
    let nfa = to_thompson_automaton(tree);
    let dfa = to_direct_dfa(tree);

    for word in words {
        println!(
            "    {:?}: {} (thompson), {} (direct)",
            word, verdict(nfa.accepts(word)), verdict(dfa.accepts(word))
        );
    }
}

/*
 * The test file may start with a "dialect plain" or "dialect parallel"
 * line, which overrides the command line. Then comes the pattern,
 * then one word per line: "+word" must be accepted, "-word" rejected.
 * Patterns never contain spaces, so the header can't be a pattern.
 */
fn dialect_header(line: &str) -> Result<Option<Dialect>, String> {
    let mut words = line.split_whitespace();
    if words.next() != Some("dialect") {
        return Ok(None)
    }

    match (words.next(), words.next()) {
        (Some("plain"), None) => Ok(Some(Dialect::Plain)),
        (Some("parallel"), None) => Ok(Some(Dialect::Parallel)),
        _ => Err(format!("Unknown dialect header \"{}\".", line.trim())),
    }
}

fn check(src: &str, mut options: Options) -> Result<(), String> {
    let mut lines = src.lines().map(str::trim).filter(|line| !line.is_empty()).peekable();

    let header = match lines.peek() {
        Some(line) => dialect_header(line)?,
        None => None,
    };
    if let Some(dialect) = header {
        options.dialect = dialect;
        lines.next();
    }

    let pattern = lines.next().ok_or_else(|| "No pattern to test.".to_string())?;
    let tree = compile_with(pattern, options)?;
    let nfa = to_thompson_automaton(&tree);
    let dfa = to_direct_dfa(&tree);

    println!("Testing {} ({:?})", pattern, options.dialect);
    let mut failed = 0;

    for (test_id, line) in lines.enumerate() {
        let (expected, word) = match line.chars().next() {
            Some('+') => (true, &line[1..]),
            Some('-') => (false, &line[1..]),
            _ => Err(format!("Expected \"+word\" or \"-word\", found \"{}\".", line))?,
        };

        let (by_nfa, by_dfa) = (nfa.accepts(word), dfa.accepts(word));
        if by_nfa == expected && by_dfa == expected {
            println!("    #{} passed.", test_id + 1);
        } else {
            failed += 1;
            println!("    #{} failed.", test_id + 1);
            println!(
                "    expected {:?} to be {}, thompson: {}, direct: {}",
                word, verdict(expected), verdict(by_nfa), verdict(by_dfa)
            );
        }
    }

    if failed == 0 {
        Ok(())
    } else {
        Err(format!("{} test(s) failed.", failed))
    }
}

fn test(file_name: &str, options: Options) -> Result<(), String> {
    let src = read_file(file_name)?;
    check(&src, options).map_err(|e| format!("{}: {}", file_name, e))
}

fn dialect_args<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec!(
        Arg::with_name("parallel")
            .help("Reads '&' as the interleave operator")
            .short("p")
            .long("parallel"),
        Arg::with_name("max-depth")
            .help("How deep groups may be nested")
            .long("max-depth")
            .takes_value(true),
    )
}

fn pattern_args<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    let mut args = vec!(
        Arg::with_name("pattern")
            .help("The regular expression")
            .required(true)
            .index(1),
    );
    args.extend(dialect_args());
    args
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let output = Arg::with_name("output")
        .help("Writes the automaton to this file")
        .short("o")
        .takes_value(true);

    let matches = App::new("regsim")
        .version("1.0")
        .author("Julien Marquet")
        .subcommand(SubCommand::with_name("tree")
            .about("Prints the parse tree and its positions")
            .args(&pattern_args()))
        .subcommand(SubCommand::with_name("nfa")
            .about("Builds the Thompson automaton")
            .args(&pattern_args())
            .arg(output.clone()))
        .subcommand(SubCommand::with_name("dfa")
            .about("Builds the deterministic automaton from positions")
            .args(&pattern_args())
            .arg(output))
        .subcommand(SubCommand::with_name("run")
            .about("Runs both automata on the given words")
            .args(&pattern_args())
            .arg(Arg::with_name("words")
                .help("The words to recognize")
                .multiple(true)
                .index(2)))
        .subcommand(SubCommand::with_name("test")
            .about("Runs the given test file")
            .arg(Arg::with_name("input")
                .help("The test file")
                .required(true)
                .index(1))
            .args(&dialect_args()))
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("tree") {
        print_tree(&parse(matches)?);
    } else if let Some(matches) = matches.subcommand_matches("nfa") {
        let nfa = to_thompson_automaton(&parse(matches)?);
        describe(nfa.to_string(), matches.value_of("output"))?;
    } else if let Some(matches) = matches.subcommand_matches("dfa") {
        let dfa = to_direct_dfa(&parse(matches)?);
        describe(dfa.to_string(), matches.value_of("output"))?;
    } else if let Some(matches) = matches.subcommand_matches("run") {
        let words: Vec<&str> = matches.values_of("words").map(|v| v.collect()).unwrap_or_else(Vec::new);
        run(&parse(matches)?, &words);
    } else if let Some(matches) = matches.subcommand_matches("test") {
        let file_name = matches.value_of("input").unwrap();
        test(file_name, options(matches)?)?;
    }

    Ok(())
}
