use wasm_bindgen::prelude::*;

mod site;
use site::Hackcelr8;

pitlane_web::export_page!(Hackcelr8);
