use mp4sync::{read_box, read_box_header, SyncSampleBox};
use std::env;
use std::fs::File;
use std::io::{self, Seek, SeekFrom};

fn main() {
    env_logger::init();

    println!("🔍 MP4 Sync Sample Scanner");
    println!("==========================");

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: stss_scanner <file.mp4> [sample_index]");
        println!("Example: stss_scanner movie.mp4 450");
        return;
    }
    let file_path = &args[1];
    let sample = match args.get(2).map(|s| s.parse::<u32>()) {
        Some(Ok(sample)) => Some(sample),
        Some(Err(e)) => {
            println!("❌ Invalid sample index {:?}: {}", args[2], e);
            return;
        }
        None => None,
    };

    match scan_mp4_structure(file_path, sample) {
        Ok(0) => println!("\nℹ️  No stss box found: every sample is a sync sample"),
        Ok(found) => println!("\n✅ Scan completed: {} stss box(es)", found),
        Err(e) => println!("\n❌ Scan failed: {}", e),
    }
}

fn scan_mp4_structure(path: &str, sample: Option<u32>) -> Result<usize, Box<dyn std::error::Error>> {
    let mut file = File::open(path)?;
    let file_size = file.metadata()?.len();

    println!("📄 File: {}", path);
    println!("📏 Size: {} bytes", file_size);
    println!();

    Ok(scan_boxes(&mut file, 0, file_size, 0, sample)?)
}

fn scan_boxes(
    file: &mut File,
    start_pos: u64,
    end_pos: u64,
    depth: usize,
    sample: Option<u32>,
) -> mp4sync::MediaResult<usize> {
    let mut current_pos = start_pos;
    let mut found = 0;

    while current_pos + 8 <= end_pos {
        file.seek(SeekFrom::Start(current_pos))?;
        let header = read_box_header(file)?;

        let actual_size = if header.size == 0 {
            end_pos - current_pos
        } else {
            header.size
        };

        let indent = "  ".repeat(depth);
        if actual_size < header.header_size || current_pos + actual_size > end_pos {
            println!(
                "{}⚠️  Invalid box size: {} at position {}",
                indent, actual_size, current_pos
            );
            break;
        }

        match &header.name_bytes {
            b"moov" | b"trak" | b"mdia" | b"minf" | b"stbl" => {
                println!("{}📦 {} [size: {}]", indent, header.name, actual_size);
                found += scan_boxes(
                    file,
                    current_pos + header.header_size,
                    current_pos + actual_size,
                    depth + 1,
                    sample,
                )?;
            }
            b"stss" => {
                file.seek(SeekFrom::Start(current_pos))?;
                let stss: SyncSampleBox = read_box(file)?;
                found += 1;
                println!(
                    "{}🔑 stss [size: {}, entries: {}]",
                    indent,
                    actual_size,
                    stss.entry_count()
                );
                stss.dump(&mut io::stdout())?;
                if let Some(sample) = sample {
                    println!(
                        "{}🎯 Sample {} → nearest sync sample #{}",
                        indent,
                        sample,
                        stss.closest_sample(sample)
                    );
                }
            }
            _ => {}
        }

        current_pos += actual_size;
    }

    Ok(found)
}
