use lopdf::xref::{Xref, XrefEntry, XrefType};
use lopdf::{Dictionary, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::BTreeMap;
use std::io::{self, Seek, Write};

/// Writes a PDF file to a seekable sink.
///
/// The header is written on construction. Every other object is buffered
/// and written in id order by [`finish`], followed by the cross-reference
/// table and the trailer, so the output depends only on what was buffered.
///
/// [`finish`]: StreamingPdfWriter::finish
pub struct StreamingPdfWriter<W: Write + Seek> {
    writer: W,
    xref: Xref,
    max_id: u32,
    pub catalog_id: ObjectId,
    pub pages_id: ObjectId,
    pub resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    info_id: Option<ObjectId>,
    buffered_objects: BTreeMap<ObjectId, Object>,
}

impl<W: Write + Seek> StreamingPdfWriter<W> {
    pub fn new(mut writer: W, version: &str, font_dict: Dictionary) -> io::Result<Self> {
        writer.write_all(format!("%PDF-{}\n", version).as_bytes())?;
        writer.write_all(b"%\xE2\xE3\xCF\xD3\n")?;

        let resources_id = (1, 0);
        let pages_id = (2, 0);
        let catalog_id = (3, 0);

        let mut buffered_objects = BTreeMap::new();
        buffered_objects.insert(resources_id, dictionary! { "Font" => font_dict }.into());

        Ok(Self {
            writer,
            xref: Xref::new(0, XrefType::CrossReferenceTable),
            max_id: 3,
            catalog_id,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            info_id: None,
            buffered_objects,
        })
    }

    pub fn new_object_id(&mut self) -> ObjectId {
        self.max_id += 1;
        (self.max_id, 0)
    }

    pub fn buffer_object(&mut self, object: Object) -> ObjectId {
        let id = self.new_object_id();
        self.buffered_objects.insert(id, object);
        id
    }

    pub fn buffer_object_at_id(&mut self, id: ObjectId, object: Object) {
        if id.0 > self.max_id {
            self.max_id = id.0;
        }
        self.buffered_objects.insert(id, object);
    }

    /// Buffers an already encoded content stream.
    pub fn buffer_content_stream(&mut self, content: Vec<u8>) -> ObjectId {
        self.buffer_object(Object::Stream(Stream::new(dictionary! {}, content)))
    }

    /// Page objects in display order; becomes the `Kids` of the page tree.
    pub fn set_page_ids(&mut self, page_ids: Vec<ObjectId>) {
        self.page_ids = page_ids;
    }

    /// Buffers the document information dictionary referenced from the trailer.
    pub fn set_info(&mut self, info: Dictionary) {
        let id = match self.info_id {
            Some(id) => id,
            None => self.new_object_id(),
        };
        self.buffer_object_at_id(id, info.into());
        self.info_id = Some(id);
    }

    pub fn finish(mut self) -> io::Result<W> {
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => self.page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => self.page_ids.len() as i64,
        };
        self.buffer_object_at_id(self.pages_id, pages_dict.into());

        let catalog_dict = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        self.buffer_object_at_id(self.catalog_id, catalog_dict.into());

        for (id, object) in &self.buffered_objects {
            internal_writer::write_indirect_object(&mut self.writer, *id, object, &mut self.xref)?;
        }

        let xref_start = self.writer.stream_position()?;
        self.xref.size = self.max_id + 1;
        internal_writer::write_xref(&mut self.writer, &self.xref)?;

        let mut trailer = dictionary! { "Size" => self.xref.size as i64, "Root" => self.catalog_id };
        if let Some(info_id) = self.info_id {
            trailer.set("Info", info_id);
        }
        writeln!(self.writer, "trailer")?;
        internal_writer::write_dictionary(&mut self.writer, &trailer)?;
        writeln!(self.writer, "\nstartxref")?;
        writeln!(self.writer, "{}", xref_start)?;
        write!(self.writer, "%%EOF")?;

        self.writer.flush()?;
        Ok(self.writer)
    }
}

mod internal_writer {
    use super::*;

    pub fn write_indirect_object<W: Write + Seek>(
        writer: &mut W,
        id: ObjectId,
        object: &Object,
        xref: &mut Xref,
    ) -> io::Result<()> {
        let offset = writer.stream_position()?;
        xref.insert(
            id.0,
            XrefEntry::Normal {
                offset: offset as u32,
                generation: id.1,
            },
        );
        writeln!(writer, "{} {} obj", id.0, id.1)?;
        write_object(writer, object)?;
        writeln!(writer, "\nendobj")?;
        Ok(())
    }

    pub fn write_object(out: &mut dyn Write, object: &Object) -> io::Result<()> {
        match object {
            Object::Null => out.write_all(b"null"),
            Object::Boolean(value) => write!(out, "{}", value),
            Object::Integer(value) => write!(out, "{}", value),
            Object::Real(value) => write!(out, "{:.3}", value),
            Object::Name(name) => {
                out.write_all(b"/")?;
                out.write_all(name)
            }
            Object::String(bytes, StringFormat::Literal) => write_literal(out, bytes),
            Object::String(bytes, StringFormat::Hexadecimal) => write_hex(out, bytes),
            Object::Array(items) => write_array(out, items),
            Object::Dictionary(dict) => write_dictionary(out, dict),
            Object::Stream(stream) => write_stream(out, stream),
            Object::Reference((id, generation)) => write!(out, "{} {} R", id, generation),
        }
    }

    /// `(` `)` and `\` are backslash-escaped; every other byte is written as is.
    fn write_literal(out: &mut dyn Write, bytes: &[u8]) -> io::Result<()> {
        let mut escaped = Vec::with_capacity(bytes.len() + 2);
        escaped.push(b'(');
        for &byte in bytes {
            if matches!(byte, b'(' | b')' | b'\\') {
                escaped.push(b'\\');
            }
            escaped.push(byte);
        }
        escaped.push(b')');
        out.write_all(&escaped)
    }

    fn write_hex(out: &mut dyn Write, bytes: &[u8]) -> io::Result<()> {
        out.write_all(b"<")?;
        for byte in bytes {
            write!(out, "{:02X}", byte)?;
        }
        out.write_all(b">")
    }

    fn write_array(out: &mut dyn Write, items: &[Object]) -> io::Result<()> {
        out.write_all(b"[")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.write_all(b" ")?;
            }
            write_object(out, item)?;
        }
        out.write_all(b"]")
    }

    /// The `Length` entry is always recomputed from the content.
    fn write_stream(out: &mut dyn Write, stream: &Stream) -> io::Result<()> {
        let mut dict = stream.dict.clone();
        dict.set("Length", stream.content.len() as i64);
        write_dictionary(out, &dict)?;
        out.write_all(b"\nstream\n")?;
        out.write_all(&stream.content)?;
        out.write_all(b"\nendstream")
    }

    /// Keys are written sorted so identical dictionaries serialize identically.
    pub fn write_dictionary(out: &mut dyn Write, dict: &Dictionary) -> io::Result<()> {
        let mut entries: Vec<_> = dict.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        out.write_all(b"<<")?;
        for (key, value) in entries {
            out.write_all(b"/")?;
            out.write_all(key)?;
            out.write_all(b" ")?;
            write_object(out, value)?;
            out.write_all(b" ")?;
        }
        out.write_all(b">>")
    }

    /// Writes a single-section table covering ids `0..size`; ids without an
    /// object are listed as free.
    pub fn write_xref<W: Write>(writer: &mut W, xref: &Xref) -> io::Result<()> {
        writeln!(writer, "xref")?;
        writeln!(writer, "0 {}", xref.size.max(1))?;
        writeln!(writer, "0000000000 65535 f ")?;
        for id in 1..xref.size {
            match xref.get(id) {
                Some(XrefEntry::Normal { offset, generation }) => {
                    writeln!(writer, "{:010} {:05} n ", offset, generation)?
                }
                _ => writeln!(writer, "0000000000 65535 f ")?,
            }
        }
        Ok(())
    }
}
