extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::path::Path;

use watasm::assembler::Parser;
use watasm::module::TypeRegistry;

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    let ifile = args.value_of("INPUT").unwrap();
    let line = match args.value_of("line").unwrap_or("1").parse::<usize>() {
        Ok(line) => line,
        Err(err) => {
            error!("fatal: invalid line number `{}`: {}", args.value_of("line").unwrap_or(""), err);
            std::process::exit(1);
        }
    };

    debug!("Arguments:\n\tInfile: {}\n\tLine: {}\n\tTypes: {:?}",
        ifile,
        line,
        args.values_of("type").map(|v| v.collect::<Vec<_>>()).unwrap_or_default()
    );

    // Read the function body.
    let ipath = Path::new(ifile);
    let text = match std::fs::read_to_string(&ipath) {
        Err(err) => {
            error!("fatal: unable to read input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(text) => text,
    };

    let mut parser = Parser::new();
    if let Err(err) = parser.parse(&text, line) {
        error!("{}: {}", ipath.display(), err);
        std::process::exit(1);
    }
    info!("assembled {} instruction(s) from `{}`", parser.instructions().len(), ipath.display());

    // Types are placed in the order they are first named.
    let mut types = TypeRegistry::new();
    for name in args.values_of("type").into_iter().flatten() {
        types.value_of(name);
    }
    let refs: Vec<_> = types.all_types().collect();
    for (id, ty) in refs.into_iter().enumerate() {
        types.use_type(ty, id as u32);
    }
    let table = match types.emission_order() {
        Ok(table) => table,
        Err(err) => {
            error!("fatal: {}", err);
            std::process::exit(1);
        }
    };

    if args.is_present("print-debug") {
        let mut grid = Grid::new(GridOptions {
            filling:     Filling::Spaces(1),
            direction:   Direction::LeftToRight,
        });

        for (idx, ins) in parser.instructions().iter().enumerate() {
            grid.add(Cell::from(format!("0x{:04X}:", idx)));
            grid.add(Cell::from(format!("{}", ins)));
            grid.add(Cell::from("@".to_string()));
            grid.add(Cell::from(format!("{}:{}", ins.line, ins.code_pos)));
        }
        println!("{}", grid.fit_into_columns(4));

        if !table.is_empty() {
            let mut grid = Grid::new(GridOptions {
                filling:     Filling::Spaces(1),
                direction:   Direction::LeftToRight,
            });
            for ty in table.iter() {
                grid.add(Cell::from(format!("type[{}]", ty.code().unwrap_or_default())));
                grid.add(Cell::from(format!("{}", ty)));
            }
            println!("{}", grid.fit_into_columns(2));
        }
    } else {
        for ins in parser.instructions() {
            println!("{}", ins);
        }
    }
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap_or("watasm"))
        .version(option_env!("CARGO_PKG_VERSION").unwrap_or("0.0.0"))
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap_or(""))
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap_or(""))
        .arg(Arg::with_name("INPUT")
            .help("Sets the file holding the function body")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("line")
            .short("l")
            .long("line")
            .takes_value(true)
            .help("source line the function body comes from, used in diagnostics"))
        .arg(Arg::with_name("type")
            .short("t")
            .long("type")
            .takes_value(true)
            .multiple(true)
            .number_of_values(1)
            .help("interns a struct type by name; repeat for more types"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .long("show")
            .alias("s")
            .takes_value(false)
            .help("prints the instruction listing and type table as a grid to STDOUT"))
        .get_matches()
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(match verbosity {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .chain(std::io::stderr())
        .apply().ok();
}
