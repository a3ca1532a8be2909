//! Data loader for the pipe-delimited input files.
//!
//! Three files feed the graph builder:
//! - actors: `<id>|<actor name>`
//! - movies: `<id>|<movie title>`
//! - movie-actors: `<movie id>|<actor id>`, one line per cast membership
//!
//! Malformed lines are skipped and reported, never fatal. Only a file that
//! cannot be opened or read fails the load.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{BaconError, Result};

pub type ActorId = i32;
pub type MovieId = i32;

/// id -> name (actors) or id -> title (movies).
pub type IdNameTable<K> = BTreeMap<K, String>;

/// movie id -> actor ids in file order.
pub type CastTable = BTreeMap<MovieId, Vec<ActorId>>;

/// A parsed table plus the records that were rejected on the way.
#[derive(Debug)]
pub struct Loaded<T> {
    pub table: T,
    pub rejected: Vec<BaconError>,
}

/// The three lookup tables the graph builder consumes.
#[derive(Debug, Default)]
pub struct Tables {
    pub actors: IdNameTable<ActorId>,
    pub movies: IdNameTable<MovieId>,
    pub cast: CastTable,
    /// Every skipped record across the three files.
    pub rejected: Vec<BaconError>,
}

/// Paths of the three input files.
#[derive(Debug, Clone)]
pub struct DataFiles {
    pub actors: PathBuf,
    pub movies: PathBuf,
    pub movie_actors: PathBuf,
}

impl From<&crate::config::DataConfig> for DataFiles {
    fn from(data: &crate::config::DataConfig) -> Self {
        Self {
            actors: data.actors.clone(),
            movies: data.movies.clone(),
            movie_actors: data.movie_actors.clone(),
        }
    }
}

/// Load all three tables.
pub fn load_tables(files: &DataFiles) -> Result<Tables> {
    let actors = load_id_names(&files.actors)?;
    let movies = load_id_names(&files.movies)?;
    let cast = load_cast(&files.movie_actors)?;

    let mut rejected = actors.rejected;
    rejected.extend(movies.rejected);
    rejected.extend(cast.rejected);

    info!(
        actors = actors.table.len(),
        movies = movies.table.len(),
        casts = cast.table.len(),
        skipped = rejected.len(),
        "loaded data tables"
    );

    Ok(Tables {
        actors: actors.table,
        movies: movies.table,
        cast: cast.table,
        rejected,
    })
}

/// Load an `<id>|<name>` file.
pub fn load_id_names(path: &Path) -> Result<Loaded<IdNameTable<i32>>> {
    let file = File::open(path).map_err(|e| BaconError::io(path, e))?;
    parse_id_names(file, path)
}

/// Load a `<movie id>|<actor id>` file.
pub fn load_cast(path: &Path) -> Result<Loaded<CastTable>> {
    let file = File::open(path).map_err(|e| BaconError::io(path, e))?;
    parse_cast(file, path)
}

/// Parse `<id>|<name>` records from any reader. `origin` labels errors.
pub fn parse_id_names<R: Read>(input: R, origin: &Path) -> Result<Loaded<IdNameTable<i32>>> {
    let mut table = BTreeMap::new();
    let rejected = for_each_record(input, origin, |line, fields| {
        expect_two_fields(fields)?;
        let id = parse_id(fields.first().copied(), "id")?;
        let name = match fields.get(1) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err("missing name".to_string()),
        };
        if let Some(previous) = table.insert(id, name) {
            debug!(path = %origin.display(), line, id, previous = %previous, "duplicate id, keeping the later line");
        }
        Ok(())
    })?;

    Ok(Loaded { table, rejected })
}

/// Parse `<movie id>|<actor id>` records from any reader.
pub fn parse_cast<R: Read>(input: R, origin: &Path) -> Result<Loaded<CastTable>> {
    let mut table: CastTable = BTreeMap::new();
    let rejected = for_each_record(input, origin, |_, fields| {
        expect_two_fields(fields)?;
        let movie = parse_id(fields.first().copied(), "movie id")?;
        let actor = parse_id(fields.get(1).copied(), "actor id")?;
        table.entry(movie).or_default().push(actor);
        Ok(())
    })?;

    Ok(Loaded { table, rejected })
}

fn expect_two_fields(fields: &[&str]) -> std::result::Result<(), String> {
    if fields.len() > 2 {
        return Err(format!("expected 2 fields, found {}", fields.len()));
    }
    Ok(())
}

fn parse_id(field: Option<&str>, what: &str) -> std::result::Result<i32, String> {
    let field = field.ok_or_else(|| format!("missing {}", what))?;
    field
        .parse()
        .map_err(|_| format!("{} is not an integer: {:?}", what, field))
}

/// Drive `handle` over every non-blank record. Records that fail to decode
/// or that `handle` rejects are collected and returned; I/O failures abort.
fn for_each_record<R, F>(input: R, origin: &Path, mut handle: F) -> Result<Vec<BaconError>>
where
    R: Read,
    F: FnMut(u64, &[&str]) -> std::result::Result<(), String>,
{
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut rejected = Vec::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map_or(0, |p| p.line());
                let reason = e.to_string();
                if let csv::ErrorKind::Io(source) = e.into_kind() {
                    return Err(BaconError::io(origin, source));
                }
                debug!(path = %origin.display(), line, %reason, "skipping undecodable record");
                rejected.push(BaconError::data(origin, line, reason));
                continue;
            }
        };

        let line = record.position().map_or(0, |p| p.line());
        let fields: Vec<&str> = record.iter().collect();
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }

        if let Err(reason) = handle(line, &fields) {
            debug!(path = %origin.display(), line, %reason, "skipping malformed record");
            rejected.push(BaconError::data(origin, line, reason));
        }
    }

    if !rejected.is_empty() {
        warn!(
            path = %origin.display(),
            skipped = rejected.len(),
            "skipped malformed records"
        );
    }

    Ok(rejected)
}
