use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};

use crate::{matcher::CountryPaths, pipe::Pipe, Error};

/// Pretty printer that keeps the output ASCII: anything outside printable
/// ASCII is written as lowercase `\uXXXX`, astral characters as surrogate
/// pairs.
struct AsciiFormatter<'a>(PrettyFormatter<'a>);

impl Formatter for AsciiFormatter<'_> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if (' '..='~').contains(&c) {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Renders `paths` as `export const <constant> = [...];`, the array pretty
/// printed with two space indentation and non-ASCII characters escaped.
pub fn render_module(constant: &str, paths: &CountryPaths) -> Result<String, Error> {
    let mut array = Vec::with_capacity(128 * paths.len() + 2);
    let mut ser = serde_json::Serializer::with_formatter(
        &mut array,
        AsciiFormatter(PrettyFormatter::with_indent(b"  ")),
    );
    paths.serialize(&mut ser)?;

    let array = String::from_utf8_lossy(&array);
    Ok(format!("export const {constant} = {array};"))
}

/// Reads back a module produced by [`render_module`].
pub fn parse_module(constant: &str, module: &str) -> Result<CountryPaths, Error> {
    let prefix = format!("export const {constant} = ");
    let array = module
        .strip_prefix(prefix.as_str())
        .ok_or_else(|| Error::MalformedModule(format!("expected `{prefix}`")))?
        .strip_suffix(';')
        .ok_or_else(|| Error::MalformedModule("missing trailing `;`".to_string()))?;
    Ok(serde_json::from_str(array)?)
}

/// Final pipeline stage, renders the collected records and replaces the
/// output file with them. Outputs the number of records written.
#[derive(Debug)]
pub struct WriteModule<'c> {
    path: &'c Path,
    constant: &'c str,
}

impl<'c> WriteModule<'c> {
    pub fn new(path: &'c Path, constant: &'c str) -> Self {
        Self { path, constant }
    }

    fn write_error(&self) -> impl FnOnce(std::io::Error) -> Error {
        let path = self.path.to_path_buf();
        move |source| Error::Write { path, source }
    }

    /// Writes next to the destination first so a failed write never leaves a
    /// truncated module behind.
    fn persist(&self, module: &str) -> Result<(), Error> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(&dir).map_err(self.write_error())?;
        file.write_all(module.as_bytes())
            .map_err(self.write_error())?;
        file.persist(self.path)
            .map_err(|err| err.error)
            .map_err(self.write_error())?;
        Ok(())
    }
}

impl Pipe for WriteModule<'_> {
    type Input = CountryPaths;

    type Output = usize;

    type Error = Error;

    #[tracing::instrument(skip_all, fields(output = %self.path.display()))]
    fn process(&mut self, paths: Self::Input) -> Result<Option<Self::Output>, Self::Error> {
        let module = render_module(self.constant, &paths)?;

        info!("Writing {} paths to {}", paths.len(), self.path.display());
        self.persist(&module)?;
        Ok(Some(paths.len()))
    }
}
