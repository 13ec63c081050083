use std::fs;
use std::path::Path;

const PLACEHOLDER: &str = "<!DOCTYPE html>\n<html lang=\"pt-BR\"><head><meta charset=\"utf-8\" />\
<title>Vault Console</title></head><body><p>Console não compilado. Execute <code>trunk build</code> \
em <code>frontend/</code>.</p></body></html>\n";

fn main() {
    let out_dir = Path::new("static");
    let dist_dir = Path::new("../frontend/dist");

    if dist_dir.exists() {
        let _ = fs::remove_dir_all(out_dir);
        fs::create_dir_all(out_dir).unwrap();
        fs_extra::dir::copy(
            dist_dir,
            out_dir,
            &fs_extra::dir::CopyOptions::new().overwrite(true).copy_inside(true),
        )
        .unwrap();
    }

    // include_dir! needs the directory to exist even before the console is built.
    let embedded = out_dir.join("dist");
    let index = embedded.join("index.html");
    if !index.exists() {
        fs::create_dir_all(&embedded).unwrap();
        fs::write(&index, PLACEHOLDER).unwrap();
    }

    println!("cargo:rerun-if-changed=../frontend/dist");
}
