//! The `synbench init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create synbench.toml
    if Path::new("synbench.toml").exists() {
        println!("synbench.toml already exists, skipping.");
    } else {
        std::fs::write("synbench.toml", SAMPLE_CONFIG)?;
        println!("Created synbench.toml");
    }

    // Create sample dataset
    std::fs::create_dir_all("datasets")?;
    let dataset_path = Path::new("datasets/synonym.csv");
    if dataset_path.exists() {
        println!("datasets/synonym.csv already exists, skipping.");
    } else {
        std::fs::write(dataset_path, SAMPLE_DATASET)?;
        println!("Created datasets/synonym.csv");
    }

    println!("\nNext steps:");
    println!("  1. Point the model paths in synbench.toml at your vector files");
    println!("  2. Run: synbench validate --dataset datasets/synonym.csv");
    println!("  3. Run: synbench run --dataset datasets/synonym.csv");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# synbench configuration

default_model = "word2vec-google-news-300"
parallelism = 4
output_dir = "./synbench-results"

[models.word2vec-google-news-300]
format = "word2vec-binary"
path = "${SYNBENCH_MODEL_DIR}/GoogleNews-vectors-negative300.bin"

[models.glove-wiki-gigaword-300]
format = "glove"
path = "${SYNBENCH_MODEL_DIR}/glove.6B.300d.txt"
"#;

const SAMPLE_DATASET: &str = "\
question,answer,0,1,2,3
enormously,tremendously,appropriately,uniquely,tremendously,decidedly
provisions,stipulations,stipulations,interrelations,jurisdictions,interpretations
haphazardly,randomly,dangerously,densely,randomly,linearly
prominent,conspicuous,battered,ancient,mysterious,conspicuous
zenith,pinnacle,completion,pinnacle,outset,decline
flawed,imperfect,tiny,imperfect,lustrous,crude
urgently,desperately,typically,conceivably,tentatively,desperately
consumed,eaten,bred,caught,eaten,supplied
advent,coming,coming,arrest,financing,stability
concisely,succinctly,powerfully,positively,freely,succinctly
";
