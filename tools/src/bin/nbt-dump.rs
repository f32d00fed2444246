use std::fs::File;
use std::io::{self, BufWriter, Write};

use clap::{App, Arg};
use env_logger::Env;
use log::{error, info};
use nbtkit::gzip;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn rewrite(path: &str, root: &nbtkit::RootTag, named: bool, compress: bool) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    if compress {
        out = gzip::write_gzip(out, root, named)?;
    } else {
        nbtkit::write(&mut out, root, named)?;
    }
    out.flush()?;

    info!("wrote {}", path);
    Ok(())
}

fn run() -> Result<()> {
    let matches = App::new("nbt-dump")
        .about("print the contents of an NBT file")
        .arg(
            Arg::with_name("file")
                .required(true)
                .help("NBT file to read, GZip compressed or not"),
        )
        .arg(
            Arg::with_name("unnamed")
                .long("unnamed")
                .help("the root tag has no name, as in network data"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("print as JSON rather than the tree format"),
        )
        .arg(
            Arg::with_name("rewrite")
                .long("rewrite")
                .takes_value(true)
                .value_name("out")
                .help("encode the tree again and write it to this path"),
        )
        .get_matches();

    // Required args are always present.
    let path = matches.value_of("file").unwrap_or_default();
    let named = !matches.is_present("unnamed");

    let data = std::fs::read(path)?;
    let compressed = gzip::is_gzip(&data);
    info!(
        "read {} bytes from {}{}",
        data.len(),
        path,
        if compressed { " (gzip)" } else { "" }
    );

    let root = gzip::read_maybe_gzip(data.as_slice(), named)?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    if matches.is_present("json") {
        serde_json::to_writer_pretty(&mut stdout, &root)?;
    } else {
        write!(stdout, "{}", root)?;
    }
    writeln!(stdout)?;

    if let Some(out) = matches.value_of("rewrite") {
        rewrite(out, &root, named, compressed)?;
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
