use roxmltree::Document;
use serde::{Deserialize, Serialize};

use crate::{config::RegionSet, pipe::Pipe, svg::PathElement, Error, RegionCode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRecord {
    pub code: RegionCode,
    pub d: String,
}

/// Records in output order, document order first then region order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryPaths(pub Vec<PathRecord>);

impl CountryPaths {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathRecord> {
        self.0.iter()
    }
}

impl<R> FromIterator<R> for CountryPaths
where
    R: IntoIterator<Item = PathRecord>,
{
    fn from_iter<T: IntoIterator<Item = R>>(iter: T) -> Self {
        Self(iter.into_iter().flatten().collect())
    }
}

/// Emits one record per region whose `sm_state_` marker occurs in the class of
/// a path. The test is a plain substring search, so `sm_state_FRX` still
/// counts as `FR`.
#[derive(Debug)]
pub struct RegionMatcher<'r, 'a, 'input> {
    markers: Vec<(&'r RegionCode, String)>,
    document: &'a Document<'input>,
}

impl<'r, 'a, 'input> RegionMatcher<'r, 'a, 'input> {
    pub fn new(regions: &'r RegionSet, document: &'a Document<'input>) -> Self {
        Self {
            markers: regions.iter().map(|code| (code, code.marker())).collect(),
            document,
        }
    }

    fn missing_d(&self, code: &RegionCode, path: &PathElement) -> Error {
        let pos = self.document.text_pos_at(path.offset);
        Error::MissingAttribute {
            code: code.clone(),
            attr: "d",
            row: pos.row,
            col: pos.col,
        }
    }
}

impl<'r, 'a, 'input> Pipe for RegionMatcher<'r, 'a, 'input> {
    type Input = PathElement<'a>;
    type Output = Vec<PathRecord>;

    type Error = Error;

    fn process(&mut self, path: Self::Input) -> Result<Option<Self::Output>, Self::Error> {
        let mut records = vec![];

        for &(code, ref marker) in &self.markers {
            if !path.class.contains(marker.as_str()) {
                continue;
            }
            let d = path
                .d
                .filter(|d| !d.is_empty())
                .ok_or_else(|| self.missing_d(code, &path))?;

            trace!(%code, offset = path.offset, "matched path");
            records.push(PathRecord {
                code: code.clone(),
                d: d.to_string(),
            });
        }

        Ok((!records.is_empty()).then_some(records))
    }

    fn close(&mut self) {
        debug!(regions = self.markers.len(), "region matching done");
    }
}
