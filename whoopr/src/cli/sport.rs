use anyhow::{Result, bail};
use serde::Serialize;
use whoop::sports::{SPORTS, sport_name};

use crate::{
    cli::SportArgs,
    output::{Output, TableRow},
};

#[derive(Debug, Serialize)]
pub struct SportEntry {
    pub id: i32,
    pub name: &'static str,
}

impl TableRow for SportEntry {
    fn headers() -> &'static [&'static str] {
        &["id", "name"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.to_string()]
    }
}

pub fn handle(output: &Output, args: &SportArgs) -> Result<()> {
    let entries: Vec<SportEntry> = match args.sport_id {
        Some(id) => {
            let Some(name) = sport_name(id) else {
                bail!("unknown sport id: {id}");
            };
            vec![SportEntry { id, name }]
        }
        None => SPORTS
            .iter()
            .map(|&(id, name)| SportEntry { id, name })
            .collect(),
    };
    output.emit_records(&entries)
}
