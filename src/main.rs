//! stelae CLI: catalog and decipher an unknown engraved script.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, bail};

use stelae::analysis;
use stelae::catalog::{
    CatalogStore, LetterRecord, SentencePart, SentenceRecord, WordRecord, next_numeric_id,
    now_timestamp,
};
use stelae::glyph::{Chain, Component, Glyph, render_glyph};
use stelae::identity::{WordCandidate, find_duplicate_letter, find_duplicate_word};
use stelae::paths::StelaePaths;

#[derive(Parser)]
#[command(name = "stelae", version, about = "Catalog and decipherment toolkit for an unknown engraved script")]
struct Cli {
    /// Data directory for the catalogs (default: XDG data dir).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and empty catalogs.
    Init,

    /// List the fixed 13-component stroke vocabulary.
    Components,

    /// Show catalog counts.
    Stats,

    /// Manage cataloged letters.
    Letter {
        #[command(subcommand)]
        action: LetterAction,
    },

    /// Manage cataloged words.
    Word {
        #[command(subcommand)]
        action: WordAction,
    },

    /// Manage cataloged sentences.
    Sentence {
        #[command(subcommand)]
        action: SentenceAction,
    },

    /// Render a letter or word to SVG or stroke JSON.
    Render {
        #[command(subcommand)]
        target: RenderTarget,
    },

    /// Print word and letter frequency histograms over the sentence corpus.
    Freq,

    /// Suggest translations by frequency-rank alignment with a reference corpus.
    Suggest {
        /// Plain-text reference corpus (default: english_sample.txt in the data dir).
        #[arg(long)]
        reference: Option<PathBuf>,

        /// Notes tag marking words whose translation is already confirmed.
        #[arg(long, default_value = "known")]
        marker: String,

        /// Compute and print suggestions without writing them back.
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
enum LetterAction {
    /// Catalog a new letter from a comma-separated component list.
    Add {
        /// Letter ID (default: next numeric ID).
        #[arg(long)]
        id: Option<String>,

        /// Comma-separated component names (e.g. "UPPER_LEFT_VERTICAL,LOWER_CIRCLE").
        #[arg(long)]
        components: String,

        #[arg(long, default_value = "")]
        notes: String,

        #[arg(long, default_value = "")]
        location: String,

        /// Save even if an identical letter already exists.
        #[arg(long)]
        force: bool,
    },
    /// List all cataloged letters.
    List,
    /// Show one letter's details.
    Show {
        id: String,
    },
}

#[derive(Subcommand)]
enum WordAction {
    /// Catalog a new word from an ordered, comma-separated letter-ID list.
    Add {
        /// Word ID (default: next numeric ID).
        #[arg(long)]
        id: Option<String>,

        /// Comma-separated letter IDs, in reading order.
        #[arg(long)]
        letters: String,

        #[arg(long, default_value = "")]
        translation: String,

        #[arg(long, default_value = "")]
        notes: String,

        #[arg(long, default_value = "")]
        location: String,

        /// Save even if a word with the same letter sequence exists.
        #[arg(long)]
        force: bool,
    },
    /// List all cataloged words.
    List,
}

#[derive(Subcommand)]
enum SentenceAction {
    /// Catalog a new sentence from ordered parts.
    Add {
        /// Sentence ID (default: next numeric ID; non-numeric IDs are
        /// excluded from frequency statistics).
        #[arg(long)]
        id: Option<String>,

        /// Sentence part, repeatable: "word:<word-id>", "text:<literal>", or
        /// "punct:<mark>".
        #[arg(long = "part", value_name = "TYPE:CONTENT")]
        parts: Vec<String>,

        #[arg(long, default_value = "")]
        translation: String,

        #[arg(long, default_value = "")]
        notes: String,

        #[arg(long, default_value = "")]
        location: String,
    },
    /// List sentences, optionally filtered by ID, translation, or location.
    List {
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Subcommand)]
enum RenderTarget {
    /// Render one letter.
    Letter {
        id: String,
        #[arg(long, default_value = "svg")]
        format: OutputFormat,
    },
    /// Render one word as a chain.
    Word {
        id: String,
        #[arg(long, default_value = "svg")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

struct Stores {
    letters: CatalogStore<LetterRecord>,
    words: CatalogStore<WordRecord>,
    sentences: CatalogStore<SentenceRecord>,
    paths: StelaePaths,
}

impl Stores {
    fn open(data_dir: Option<PathBuf>) -> Result<Self> {
        let paths = match data_dir {
            Some(dir) => StelaePaths::at(dir),
            None => StelaePaths::resolve()?,
        };
        Ok(Self {
            letters: CatalogStore::new(paths.letters_file()),
            words: CatalogStore::new(paths.words_file()),
            sentences: CatalogStore::new(paths.sentences_file()),
            paths,
        })
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let stores = Stores::open(cli.data_dir.clone())?;

    match cli.command {
        Commands::Init => {
            stores.paths.ensure_dirs()?;
            stores.letters.init()?;
            stores.words.init()?;
            stores.sentences.init()?;
            println!("initialized catalogs in {}", stores.paths.data_dir.display());
        }

        Commands::Components => {
            for component in Component::ALL {
                println!("{:<28} ({:?} band)", component.name(), component.band());
            }
        }

        Commands::Stats => {
            let letters = stores.letters.load()?;
            let words = stores.words.load()?;
            let sentences = stores.sentences.load()?;
            println!("letters cataloged:   {}", letters.len());
            println!("words composed:      {}", words.len());
            println!("sentences recorded:  {}", sentences.len());
        }

        Commands::Letter { action } => run_letter(&stores, action)?,
        Commands::Word { action } => run_word(&stores, action)?,
        Commands::Sentence { action } => run_sentence(&stores, action)?,
        Commands::Render { target } => run_render(&stores, target)?,

        Commands::Freq => {
            let letters = stores.letters.load()?;
            let words = stores.words.load()?;
            let sentences = stores.sentences.load()?;
            let dist = analysis::compute_frequency_distribution(&letters, &words, &sentences);

            println!("word frequency:");
            for (word_id, count) in dist.words_by_count() {
                println!("  {word_id:<12} {count}");
            }
            println!("letter frequency:");
            for (letter_id, count) in dist.letters_by_count() {
                println!("  {letter_id:<12} {count}");
            }
        }

        Commands::Suggest {
            reference,
            marker,
            dry_run,
        } => {
            let reference_path = reference.unwrap_or_else(|| stores.paths.reference_file());
            let ranked = analysis::load_reference_frequencies(&reference_path)?;

            println!(
                "reference corpus: {} distinct words, most common:",
                ranked.len(),
            );
            for (word, count) in ranked.iter().take(25) {
                println!("  {word:<16} {count}");
            }

            let letters = stores.letters.load()?;
            let mut words = stores.words.load()?;
            let sentences = stores.sentences.load()?;
            let commit = if dry_run { None } else { Some(&stores.words) };

            let suggestions = analysis::suggest_translations(
                &letters,
                &mut words,
                &sentences,
                &ranked,
                &marker,
                commit,
            )?;

            if suggestions.is_empty() {
                println!("no suggestions (empty corpus or every word already confirmed)");
            }
            for s in suggestions {
                println!("{:<12} -> {:<16} (seen {}x)", s.word_id, s.translation, s.count);
            }
            if dry_run {
                println!("(dry run: nothing written)");
            }
        }
    }

    Ok(())
}

fn run_letter(stores: &Stores, action: LetterAction) -> Result<()> {
    match action {
        LetterAction::Add {
            id,
            components,
            notes,
            location,
            force,
        } => {
            let mut glyph = Glyph::new();
            for name in components.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                glyph.activate_name(name)?;
            }

            let letters = stores.letters.load()?;
            if let Some(existing) = find_duplicate_letter(&glyph, &letters) {
                if !force {
                    bail!(
                        "this letter configuration already exists with ID '{existing}' \
                         (use --force to save anyway)"
                    );
                }
                eprintln!("warning: duplicate of letter '{existing}', saving anyway");
            }

            let id = id.unwrap_or_else(|| next_numeric_id(&letters));
            let record = LetterRecord {
                id: id.clone(),
                components: glyph.active_components(),
                notes,
                location_found: location,
                date_added: now_timestamp(),
            };
            stores.letters.put(&id, record)?;
            println!("letter '{id}' saved");
        }

        LetterAction::List => {
            for (id, letter) in stores.letters.load()? {
                println!(
                    "{id:<8} {} components{}",
                    letter.components.len(),
                    if letter.location_found.is_empty() {
                        String::new()
                    } else {
                        format!("  found: {}", letter.location_found)
                    },
                );
            }
        }

        LetterAction::Show { id } => {
            let Some(letter) = stores.letters.get(&id)? else {
                bail!("no letter with ID '{id}'");
            };
            println!("id:       {}", letter.id);
            println!("added:    {}", letter.date_added);
            if !letter.location_found.is_empty() {
                println!("found:    {}", letter.location_found);
            }
            if !letter.notes.is_empty() {
                println!("notes:    {}", letter.notes);
            }
            for component in &letter.components {
                println!("  {component}");
            }
        }
    }
    Ok(())
}

fn run_word(stores: &Stores, action: WordAction) -> Result<()> {
    match action {
        WordAction::Add {
            id,
            letters,
            translation,
            notes,
            location,
            force,
        } => {
            let letter_ids: Vec<String> = letters
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if letter_ids.is_empty() {
                bail!("a word needs at least one letter ID");
            }

            let letter_catalog = stores.letters.load()?;
            for letter_id in &letter_ids {
                if !letter_catalog.contains_key(letter_id) {
                    bail!("unknown letter ID '{letter_id}' — catalog it first");
                }
            }

            let words = stores.words.load()?;
            let candidate = WordCandidate::LetterIds(&letter_ids);
            if let Some(existing) = find_duplicate_word(&candidate, &words, &letter_catalog) {
                if !force {
                    bail!(
                        "a word with this letter sequence already exists with ID \
                         '{existing}' (use --force to save anyway)"
                    );
                }
                eprintln!("warning: duplicate of word '{existing}', saving anyway");
            }

            let id = id.unwrap_or_else(|| next_numeric_id(&words));
            let record = WordRecord {
                id: id.clone(),
                letter_ids,
                components: None,
                translation,
                notes,
                location_found: location,
                date_added: now_timestamp(),
            };
            stores.words.put(&id, record)?;
            println!("word '{id}' saved");
        }

        WordAction::List => {
            for (id, word) in stores.words.load()? {
                let slots = word
                    .components
                    .as_ref()
                    .map_or(word.letter_ids.len(), Vec::len);
                println!(
                    "{id:<8} {slots} letters{}",
                    if word.translation.is_empty() {
                        String::new()
                    } else {
                        format!("  \"{}\"", word.translation)
                    },
                );
            }
        }
    }
    Ok(())
}

fn run_sentence(stores: &Stores, action: SentenceAction) -> Result<()> {
    match action {
        SentenceAction::Add {
            id,
            parts,
            translation,
            notes,
            location,
        } => {
            let words = stores.words.load()?;
            let mut components = Vec::new();
            for spec in &parts {
                components.push(parse_part(spec, &words)?);
            }
            if components.is_empty() {
                bail!("a sentence needs at least one --part");
            }

            let sentences = stores.sentences.load()?;
            let id = id.unwrap_or_else(|| next_numeric_id(&sentences));
            let record = SentenceRecord {
                id: id.clone(),
                components,
                translation,
                notes,
                location_found: location,
                date_added: now_timestamp(),
            };
            stores.sentences.put(&id, record)?;
            println!("sentence '{id}' saved");
        }

        SentenceAction::List { search } => {
            let words = stores.words.load()?;
            let needle = search.unwrap_or_default().to_lowercase();
            for (id, sentence) in stores.sentences.load()? {
                let matches = needle.is_empty()
                    || id.to_lowercase().contains(&needle)
                    || sentence.translation.to_lowercase().contains(&needle)
                    || sentence.location_found.to_lowercase().contains(&needle);
                if !matches {
                    continue;
                }
                println!("{id}: {}", sentence.preview(&words));
                if !sentence.translation.is_empty() {
                    println!("    translation: {}", sentence.translation);
                }
                if !sentence.location_found.is_empty() {
                    println!("    found: {}", sentence.location_found);
                }
            }
        }
    }
    Ok(())
}

fn parse_part(spec: &str, words: &BTreeMap<String, WordRecord>) -> Result<SentencePart> {
    let Some((kind, content)) = spec.split_once(':') else {
        bail!("malformed part '{spec}': expected TYPE:CONTENT");
    };
    let content = content.to_string();
    match kind {
        "word" => {
            if !words.contains_key(&content) {
                bail!("unknown word ID '{content}' — catalog it first");
            }
            Ok(SentencePart::Word { content })
        }
        "text" => Ok(SentencePart::Text { content }),
        "punct" => Ok(SentencePart::Punct { content }),
        other => bail!("unknown part type '{other}' (expected word, text, or punct)"),
    }
}

fn run_render(stores: &Stores, target: RenderTarget) -> Result<()> {
    let (drawing, format) = match target {
        RenderTarget::Letter { id, format } => {
            let Some(letter) = stores.letters.get(&id)? else {
                bail!("no letter with ID '{id}'");
            };
            (render_glyph(&letter.glyph()), format)
        }
        RenderTarget::Word { id, format } => {
            let Some(word) = stores.words.get(&id)? else {
                bail!("no word with ID '{id}'");
            };
            let letters = stores.letters.load()?;
            let chain: Chain = word.chain(&letters);
            (chain.render(), format)
        }
    };

    match format {
        OutputFormat::Svg => print!("{}", drawing.to_svg()),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&drawing).into_diagnostic()?,
            );
        }
    }
    Ok(())
}
