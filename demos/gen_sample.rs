use std::fs;

use anyhow::Result;

fn main() -> Result<()> {
    fs::create_dir_all("ssl_output")?;

    let mut wtr = csv::Writer::from_path("ssl_output/summary.csv")?;
    wtr.write_record(["Host", "SSLv3", "TLS1.0", "TLS1.1", "TLS1.2", "TLS1.3"])?;
    wtr.write_record(["example.com", "Non", "Oui", "Oui", "Oui", "Oui"])?;
    wtr.write_record(["legacy.example", "Oui", "Oui", "Non", "Non", "Non"])?;
    // 空字段和非 oui/non 的值不着色
    wtr.write_record(["unreachable.example", "", "", "", "", "timeout"])?;
    wtr.flush()?;

    println!("Wrote ssl_output/summary.csv");
    Ok(())
}
