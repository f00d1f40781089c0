use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};

use std::env;
use std::fs::File;
use std::path::PathBuf;

fn main() {
    let dest = PathBuf::from(&env::var("OUT_DIR").unwrap());
    println!("cargo:rerun-if-changed=build/main.rs");

    let mut file = File::create(dest.join("gl_bindings.rs")).unwrap();

    // the material pipeline only relies on the ES 2.0 core, which every desktop GL >= 4.1
    // context also exposes
    Registry::new(Api::Gles2, (2, 0), Profile::Core, Fallbacks::All, [])
        .write_bindings(StructGenerator, &mut file)
        .unwrap();
}
