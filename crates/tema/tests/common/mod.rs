#![allow(dead_code)]

use tema_lib::{Campaign, TopicClassifier};

pub const V1: &str = "back-to-school-v1";
pub const V2: &str = "back-to-school-v2";

pub const OFF_TOPIC: &str = "Fuera de Tema / No Relevante";

pub fn builtin_classifier(id: &str) -> TopicClassifier {
    Campaign::builtin(id).unwrap().classifier().unwrap()
}

pub fn write_campaign(dir: &std::path::Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
