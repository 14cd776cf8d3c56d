use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

/// Static merchant payload with a valid trailing checksum.
pub const STATIC_PAYLOAD: &str = "00020101021126570011ID.DANA.WWW011893600915302259148502090225914850303UMI51440014ID.CO.QRIS.WWW0215ID10200176114730303UMI5204549953033605802ID5920KOPERASI WARGA RT 056007JAKARTA61051234562070703A0163044267";

/// `STATIC_PAYLOAD` issued for 10000 with nonce 005.
pub const DYNAMIC_10005: &str = "00020101021226570011ID.DANA.WWW011893600915302259148502090225914850303UMI51440014ID.CO.QRIS.WWW0215ID10200176114730303UMI5204549953033605405100055802ID5920KOPERASI WARGA RT 056007JAKARTA61051234562070703A016304375C";

/// `STATIC_PAYLOAD` issued for 15000 with nonce 007.
pub const DYNAMIC_15007: &str = "00020101021226570011ID.DANA.WWW011893600915302259148502090225914850303UMI51440014ID.CO.QRIS.WWW0215ID10200176114730303UMI5204549953033605405150075802ID5920KOPERASI WARGA RT 056007JAKARTA61051234562070703A0163045E3E";

pub fn write_static_payload(path: &Path, payload: &str) -> Result<(), Error> {
    let mut file = File::create(path)?;
    writeln!(file, "{payload}")?;
    Ok(())
}

pub fn generate_bills_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["resident", "amount"])?;
    for i in 1..=rows {
        wtr.write_record([format!("Resident {i}"), (10_000 + i * 500).to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}
