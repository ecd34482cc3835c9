use std::collections::HashMap;
use std::io::Write;

use anyhow::{anyhow, Result};
use uuid::Uuid;

use toonshelf::prelude::*;

use crate::cli::Commands;

/// A library plus the per-item audio toggles of one CLI run or shell session.
pub struct Session {
    library: Library,
    players: HashMap<Uuid, AudioControl<TracingBackend>>,
}

impl Session {
    pub fn new(library: Library) -> Self {
        Self { library, players: HashMap::new() }
    }

    pub fn library(&self) -> &Library { &self.library }

    pub async fn run(&mut self, command: Commands, out: &mut dyn Write) -> Result<()> {
        match command {
            Commands::Categories => self.categories(out),
            Commands::List { category } => self.list(category.as_deref(), out),
            Commands::Show { item } => self.show(&item, out),
            Commands::Favorite { item } => {
                let webtoon = self.resolve(&item)?.clone();
                match self.library.toggle_favorite(&webtoon).await {
                    Toggle::Added => writeln!(out, "Added \"{}\" to favorites", webtoon.title)?,
                    Toggle::Removed => writeln!(out, "Removed \"{}\" from favorites", webtoon.title)?,
                }
                Ok(())
            }
            Commands::Favorites => self.favorites(out),
            Commands::Rate { item, stars } => {
                let webtoon = self.resolve(&item)?.clone();
                let rating = self
                    .library
                    .update_rating(&webtoon, stars)
                    .ok_or_else(|| anyhow!("rating must be between 1 and {}", Rating::MAX))?;
                writeln!(out, "Rated \"{}\" {}", webtoon.title, star_line(rating))?;
                Ok(())
            }
            Commands::Play { item } => {
                let webtoon = self.resolve(&item)?.clone();
                let player = self
                    .players
                    .entry(webtoon.id)
                    .or_insert_with(|| AudioControl::new(webtoon.audio_url.clone(), TracingBackend::default()));
                match player.toggle()? {
                    PlaybackState::Playing => writeln!(out, "Playing \"{}\" <{}>", webtoon.title, webtoon.audio_url)?,
                    PlaybackState::Paused => writeln!(out, "Paused \"{}\"", webtoon.title)?,
                }
                Ok(())
            }
            Commands::Shell => Err(anyhow!("already in a shell")),
        }
    }

    fn resolve(&self, selector: &str) -> Result<&Webtoon> {
        self.library
            .catalog()
            .resolve(selector)
            .ok_or_else(|| anyhow!("no webtoon matches `{}` (use a catalog number or id)", selector))
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.library.webtoons().iter().position(|w| w.id == id).map(|i| i + 1)
    }

    fn categories(&self, out: &mut dyn Write) -> Result<()> {
        if self.library.webtoons().is_empty() {
            writeln!(out, "No webtoons available.")?;
            return Ok(());
        }
        writeln!(out, "Webtoon Categories")?;
        for category in self.library.categories() {
            let count = self.library.catalog().in_category(category).count();
            writeln!(out, "  {} ({})", category, count)?;
        }
        Ok(())
    }

    fn list(&self, category: Option<&str>, out: &mut dyn Write) -> Result<()> {
        if self.library.webtoons().is_empty() {
            writeln!(out, "No webtoons available.")?;
            return Ok(());
        }
        let categories = match category {
            Some(c) => {
                if !self.library.categories().contains(&c) {
                    return Err(anyhow!("unknown category `{}`", c));
                }
                vec![c]
            }
            None => self.library.categories(),
        };
        for category in categories {
            writeln!(out, "{}", category)?;
            for w in self.library.catalog().in_category(category) {
                let mark = if self.library.is_favorite(w.id) { "*" } else { " " };
                let pos = self.position(w.id).unwrap_or_default();
                writeln!(out, " {}{:>3}. {}", mark, pos, w.title)?;
            }
        }
        Ok(())
    }

    fn show(&self, selector: &str, out: &mut dyn Write) -> Result<()> {
        let w = self.resolve(selector)?;
        let playing = self.players.get(&w.id).is_some_and(|p| p.is_playing());
        let favorite_action = if self.library.is_favorite(w.id) { "Remove from Favorites" } else { "Add to Favorites" };
        writeln!(out, "{}", w.title)?;
        writeln!(out, "  Category:    {}", w.category)?;
        writeln!(out, "  {}", w.description)?;
        writeln!(out, "  Rating:      {}", star_line(w.rating))?;
        writeln!(out, "  Audio:       {} [{}]", w.audio_url, if playing { "playing" } else { "paused" })?;
        writeln!(out, "  Favorite:    {}", favorite_action)?;
        writeln!(out, "  Id:          {}", w.id)?;
        Ok(())
    }

    fn favorites(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Favorites")?;
        if self.library.favorites().is_empty() {
            writeln!(out, "  (none yet)")?;
            return Ok(());
        }
        for w in self.library.favorites() {
            writeln!(out, "  {} - {} {}", w.title, w.category, star_line(w.rating))?;
        }
        Ok(())
    }
}

pub fn star_line(rating: Rating) -> String {
    (1..=Rating::MAX).map(|s| if rating.get() >= s { '★' } else { '☆' }).collect()
}
