//! Shared test utilities for integration tests.
//!
//! Archives here are assembled byte by byte, independently of the crate's
//! own writer, so loading them checks the reader against the format rather
//! than against itself.

#![allow(dead_code)]

use flate2::Compression;
use flate2::write::DeflateEncoder;
use std::io::Write;

pub const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D',
    b'R', 0xFF, 0xD8, 0xC0,
];

pub const UNICODE_TEXT: &str = "Hello, wörld! Привет мир. こんにちは 🌍\n";

pub const A_JSON: &str = r#"{"k":1}"#;

/// How a hand-built entry is stored.
#[derive(Clone, Copy)]
pub enum Method {
    Stored,
    Deflate,
}

/// The three-entry sample used across tests, in this order.
pub fn sample_entries() -> Vec<(&'static str, Vec<u8>, Method)> {
    vec![
        ("contents/a.json", A_JSON.as_bytes().to_vec(), Method::Stored),
        ("contents/icon.png", PNG_BYTES.to_vec(), Method::Stored),
        (
            "contents/unicode.txt",
            UNICODE_TEXT.as_bytes().to_vec(),
            Method::Deflate,
        ),
    ]
}

pub fn sample_zip() -> Vec<u8> {
    build_zip(&sample_entries(), b"")
}

/// Assemble a single-disk ZIP file with an optional archive comment.
pub fn build_zip(entries: &[(&str, Vec<u8>, Method)], comment: &[u8]) -> Vec<u8> {
    let entries: Vec<_> = entries
        .iter()
        .map(|(name, content, method)| (name.as_bytes(), content.clone(), *method))
        .collect();
    assemble(&entries, comment, false)
}

/// Like [`build_zip`], but every size and offset is carried in ZIP64
/// extra fields and the directory is located through a ZIP64 EOCD.
pub fn build_zip64(entries: &[(&str, Vec<u8>, Method)]) -> Vec<u8> {
    let entries: Vec<_> = entries
        .iter()
        .map(|(name, content, method)| (name.as_bytes(), content.clone(), *method))
        .collect();
    assemble(&entries, b"", true)
}

/// Stored entries with raw name bytes and no UTF-8 flag, the way DOS-era
/// tools wrote them.
pub fn build_legacy_zip(entries: &[(&[u8], &[u8])]) -> Vec<u8> {
    let entries: Vec<_> = entries
        .iter()
        .map(|(name, content)| (*name, content.to_vec(), Method::Stored))
        .collect();
    assemble(&entries, b"", false)
}

fn assemble(entries: &[(&[u8], Vec<u8>, Method)], comment: &[u8], zip64: bool) -> Vec<u8> {
    const SATURATED: u32 = 0xFFFF_FFFF;
    let version: u16 = if zip64 { 45 } else { 20 };
    let mut out = Vec::new();
    let mut central = Vec::new();

    for (name, content, method) in entries {
        let (method_id, data) = match method {
            Method::Stored => (0u16, content.clone()),
            Method::Deflate => {
                let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
                encoder.write_all(content).unwrap();
                (8u16, encoder.finish().unwrap())
            }
        };
        let crc = crc32fast::hash(content);
        let offset = out.len() as u64;
        // 2021-04-20 12:30:00
        let (time, date) = ((12u16 << 11) | (30 << 5), ((2021u16 - 1980) << 9) | (4 << 5) | 20);
        let (csize, usize_, offset32) = if zip64 {
            (SATURATED, SATURATED, SATURATED)
        } else {
            (data.len() as u32, content.len() as u32, offset as u32)
        };

        out.extend_from_slice(b"PK\x03\x04");
        out.extend_from_slice(&version.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&method_id.to_le_bytes());
        out.extend_from_slice(&time.to_le_bytes());
        out.extend_from_slice(&date.to_le_bytes());
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&csize.to_le_bytes());
        out.extend_from_slice(&usize_.to_le_bytes());
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        if zip64 {
            out.extend_from_slice(&20u16.to_le_bytes());
            out.extend_from_slice(name);
            out.extend_from_slice(&1u16.to_le_bytes());
            out.extend_from_slice(&16u16.to_le_bytes());
            out.extend_from_slice(&(content.len() as u64).to_le_bytes());
            out.extend_from_slice(&(data.len() as u64).to_le_bytes());
        } else {
            // a local extra field the central directory does not repeat
            out.extend_from_slice(&4u16.to_le_bytes());
            out.extend_from_slice(name);
            out.extend_from_slice(&[0xCA, 0xFE, 0x00, 0x00]);
        }
        out.extend_from_slice(&data);

        central.extend_from_slice(b"PK\x01\x02");
        central.extend_from_slice(&version.to_le_bytes());
        central.extend_from_slice(&version.to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes());
        central.extend_from_slice(&method_id.to_le_bytes());
        central.extend_from_slice(&time.to_le_bytes());
        central.extend_from_slice(&date.to_le_bytes());
        central.extend_from_slice(&crc.to_le_bytes());
        central.extend_from_slice(&csize.to_le_bytes());
        central.extend_from_slice(&usize_.to_le_bytes());
        central.extend_from_slice(&(name.len() as u16).to_le_bytes());
        let extra_len: u16 = if zip64 { 28 } else { 0 };
        central.extend_from_slice(&extra_len.to_le_bytes());
        central.extend_from_slice(&0u16.to_le_bytes()); // comment
        central.extend_from_slice(&0u16.to_le_bytes()); // disk
        central.extend_from_slice(&0u16.to_le_bytes()); // internal attrs
        central.extend_from_slice(&0u32.to_le_bytes()); // external attrs
        central.extend_from_slice(&offset32.to_le_bytes());
        central.extend_from_slice(name);
        if zip64 {
            central.extend_from_slice(&1u16.to_le_bytes());
            central.extend_from_slice(&24u16.to_le_bytes());
            central.extend_from_slice(&(content.len() as u64).to_le_bytes());
            central.extend_from_slice(&(data.len() as u64).to_le_bytes());
            central.extend_from_slice(&offset.to_le_bytes());
        }
    }

    let cd_offset = out.len() as u64;
    let cd_size = central.len() as u64;
    let count = entries.len() as u64;
    out.extend_from_slice(&central);

    if zip64 {
        let eocd64_offset = out.len() as u64;
        out.extend_from_slice(b"PK\x06\x06");
        out.extend_from_slice(&44u64.to_le_bytes());
        out.extend_from_slice(&45u16.to_le_bytes());
        out.extend_from_slice(&45u16.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&count.to_le_bytes());
        out.extend_from_slice(&count.to_le_bytes());
        out.extend_from_slice(&cd_size.to_le_bytes());
        out.extend_from_slice(&cd_offset.to_le_bytes());

        out.extend_from_slice(b"PK\x06\x07");
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&eocd64_offset.to_le_bytes());
        out.extend_from_slice(&1u32.to_le_bytes());
    }

    let (count16, cd_size32, cd_offset32) = if zip64 {
        (0xFFFFu16, SATURATED, SATURATED)
    } else {
        (count as u16, cd_size as u32, cd_offset as u32)
    };
    out.extend_from_slice(b"PK\x05\x06");
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&count16.to_le_bytes());
    out.extend_from_slice(&count16.to_le_bytes());
    out.extend_from_slice(&cd_size32.to_le_bytes());
    out.extend_from_slice(&cd_offset32.to_le_bytes());
    out.extend_from_slice(&(comment.len() as u16).to_le_bytes());
    out.extend_from_slice(comment);

    out
}

/// Write the sample entries as real files under `dir`, returning their
/// entry paths.
pub fn write_sample_tree(dir: &std::path::Path) -> Vec<&'static str> {
    let mut names = Vec::new();
    for (name, content, _) in sample_entries() {
        let path = dir.join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        names.push(name);
    }
    names
}
