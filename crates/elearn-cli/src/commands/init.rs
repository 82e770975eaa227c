//! The `elearn init` command.

use std::path::Path;

use anyhow::Result;

use elearn_core::model::{Course, Test};
use elearn_core::{Dataset, DomainStore};
use elearn_store::JsonFileStore;

pub fn execute() -> Result<()> {
    if Path::new("elearn.toml").exists() {
        println!("elearn.toml already exists, skipping.");
    } else {
        std::fs::write("elearn.toml", SAMPLE_CONFIG)?;
        println!("Created elearn.toml");
    }

    std::fs::create_dir_all("data")?;

    let dataset_path = Path::new("data/dataset.json");
    if dataset_path.exists() {
        println!("data/dataset.json already exists, skipping.");
    } else {
        JsonFileStore::new(dataset_path).save(&sample_dataset())?;
        println!("Created data/dataset.json");
    }

    let bank_path = Path::new("data/question-bank.toml");
    if bank_path.exists() {
        println!("data/question-bank.toml already exists, skipping.");
    } else {
        std::fs::write(bank_path, SAMPLE_QUESTION_BANK)?;
        println!("Created data/question-bank.toml");
    }

    println!("\nNext steps:");
    println!("  1. Change the admin password in elearn.toml");
    println!("  2. Run: elearn validate-bank");
    println!("  3. Run: elearn register --username <name> --password <password>");

    Ok(())
}

fn sample_dataset() -> Dataset {
    let test = |id: &str, kind: &str| Test {
        id: id.to_string(),
        kind: kind.to_string(),
    };
    Dataset::new(
        vec![
            Course {
                id: "C1".to_string(),
                name: "Rust Fundamentals".to_string(),
                tests: vec![test("T1", "Quiz"), test("T2", "Final")],
            },
            Course {
                id: "C2".to_string(),
                name: "Systems Programming".to_string(),
                tests: vec![test("T1", "Quiz")],
            },
        ],
        Vec::new(),
    )
}

const SAMPLE_CONFIG: &str = r#"# elearn configuration

dataset_path = "./data/dataset.json"
question_bank_path = "./data/question-bank.toml"

# ELEARN_ADMIN_PASSWORD overrides the password below.
[admin]
username = "admin"
password = "admin1"
"#;

const SAMPLE_QUESTION_BANK: &str = r#"[[courses]]
name = "Rust Fundamentals"

[[courses.questions]]
text = "Which keyword declares an immutable binding?"
a = "let"
b = "mut"
c = "static mut"
d = "var"
answer = "A"

[[courses.questions]]
text = "What does the `?` operator do on an `Err` value?"
a = "Panics"
b = "Returns the error from the enclosing function"
c = "Ignores it"
d = "Converts it to `None`"
answer = "B"

[[courses.questions]]
text = "Which type owns a growable, heap-allocated string?"
a = "&str"
b = "char"
c = "String"
d = "[u8; 4]"
answer = "C"

[[courses.questions]]
text = "How many mutable references to a value may exist at once?"
a = "Any number"
b = "Two"
c = "None"
d = "One"
answer = "D"

[[courses.questions]]
text = "Which trait enables `{}` formatting?"
a = "Display"
b = "Debug"
c = "Clone"
d = "Default"
answer = "A"

[[courses]]
name = "Systems Programming"

[[courses.questions]]
text = "Which system call creates a new process on Unix?"
a = "exec"
b = "fork"
c = "wait"
d = "kill"
answer = "B"

[[courses.questions]]
text = "What does a page fault signal?"
a = "A disk is full"
b = "A process exited"
c = "An accessed page is not in memory"
d = "A signal handler ran"
answer = "C"

[[courses.questions]]
text = "Which structure maps virtual to physical addresses?"
a = "Page table"
b = "Inode"
c = "File descriptor"
d = "Run queue"
answer = "A"

[[courses.questions]]
text = "What does `mmap` return on success?"
a = "A file descriptor"
b = "A process id"
c = "Zero"
d = "A pointer to the mapped region"
answer = "D"
"#;
