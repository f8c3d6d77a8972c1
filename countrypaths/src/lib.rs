#[macro_use]
extern crate tracing;

pub mod config;
pub mod matcher;
pub mod pipe;
pub mod ser;
pub mod svg;

use std::path::PathBuf;

pub use config::{Config, RegionCode, RegionSet, EU_CODES, EXTRA_CODES};
pub use matcher::{CountryPaths, PathRecord, RegionMatcher};

use crate::{
    pipe::{ChainedPipe, Pipe, Producer, TryCollector},
    ser::WriteModule,
    svg::{PathElement, SvgPaths},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not read svg `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed svg document")]
    Parse(#[from] roxmltree::Error),
    #[error("path marked `sm_state_{code}` at {row}:{col} has no `{attr}` attribute")]
    MissingAttribute {
        code: RegionCode,
        attr: &'static str,
        row: u32,
        col: u32,
    },
    #[error("could not write module `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not serialize path records")]
    Serialize(#[from] serde_json::Error),
    #[error("`{0}` is not a two letter uppercase region code")]
    InvalidRegionCode(String),
    #[error("not a data module: {0}")]
    MalformedModule(String),
}

pub type RegionPaths<'r, 'a, 'input> =
    ChainedPipe<SvgPaths<'a, 'input>, RegionMatcher<'r, 'a, 'input>, PathElement<'a>, Error>;

/// Producer of the records of every svg path in `document` marked with one of
/// `regions`, one batch per path.
pub fn region_paths<'r, 'a, 'input>(
    document: &'a roxmltree::Document<'input>,
    regions: &'r RegionSet,
) -> RegionPaths<'r, 'a, 'input> {
    SvgPaths::new(document).feed(RegionMatcher::new(regions, document))
}

/// Collects every record of `regions` found in the svg document `text`.
pub fn extract(text: &str, regions: &RegionSet) -> Result<CountryPaths, Error> {
    let document = svg::parse_document(text)?;

    TryCollector::new()
        .process(region_paths(&document, regions))
        .map(Option::unwrap_or_default)
}

/// Reads `config.input`, extracts the configured regions and writes the data
/// module to `config.output`. Returns the number of records written.
///
/// The output file is only replaced once every path has been matched, a
/// failing run leaves it as it was.
#[tracing::instrument(skip_all, fields(input = %config.input.display()))]
pub fn run(config: &Config) -> Result<usize, Error> {
    let text = std::fs::read_to_string(&config.input).map_err(|source| Error::Read {
        path: config.input.clone(),
        source,
    })?;
    let document = svg::parse_document(&text)?;

    let mut pipes = region_paths(&document, &config.regions)
        .producer()
        .feed(
            TryCollector::<_, CountryPaths>::new()
                .pipe(WriteModule::new(&config.output, &config.constant)),
        );

    Ok(pipes.produce().transpose()?.unwrap_or_default())
}
