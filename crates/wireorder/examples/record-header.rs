//! Writes a small big-endian record header and reads it back.
//!
//! Run with: cargo run -p wireorder --example record-header

use std::io::Cursor;

use wireorder::{ByteOrder, CodecConfig, EndianReader, EndianWriter, TextEncoding};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let config = CodecConfig::new(ByteOrder::Big, TextEncoding::Utf8);

    let mut writer = EndianWriter::with_config(Vec::new(), config.clone())?;
    writer.write_fixed_string("WREC", 4)?;
    writer.write_u16(2)?;
    writer.write_bstring("sensor-7")?;
    writer.write_f64(21.75)?;
    writer.write_zstring("calibrated")?;
    let bytes = writer.into_inner();

    println!("{} bytes: {:02X?}", bytes.len(), bytes);

    let mut reader = EndianReader::with_config(Cursor::new(bytes), config)?;
    let magic = reader.read_fixed_string(4)?;
    let version = reader.read_u16()?;
    let name = reader.read_bstring()?;
    let reading = reader.read_f64()?;
    let note = reader.read_zstring()?;

    println!("magic={magic} version={version} name={name} reading={reading} note={note}");
    Ok(())
}
