/*!
 * Translation facade.
 *
 * The Translator is the single entry point of the library: it routes plain
 * text, markup strings/bytes, files, and pre-parsed trees to the pipelines
 * underneath, and exposes the engine's capability surface.
 */

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use markup5ever_rcdom::{Handle, RcDom};

use crate::app_config::Config;
use crate::engines::{self, Detection, TranslationEngine};
use crate::errors::{TranslationError, TranslationResult};
use crate::file_utils::{FileKind, FileManager};
use crate::language_utils::{LanguageMap, normalize_code};
use crate::markup::{
    DEFAULT_ENCODING, TranslatableTags, direct_text, parse_markup, parse_markup_bytes,
    serialize_tree, serialize_tree_bytes, set_direct_text,
};
use crate::translation::{TranslationMemo, TranslationService, TreeTranslator};

/// Facade over a translation engine, a memo cache, and the tree pipeline
pub struct Translator {
    /// Translation service bound to the selected engine
    service: TranslationService,

    /// Allow-list of translatable tag names for markup translation
    tags: TranslatableTags,

    /// Configuration the translator was built from
    config: Config,
}

impl Translator {
    /// Create a translator for a registered engine name.
    ///
    /// Fails fast with `InvalidArgument` when the name is unknown.
    pub fn new(engine_name: &str) -> TranslationResult<Self> {
        Self::with_config(Config::for_engine(engine_name))
    }

    /// Create a translator from a full configuration
    pub fn with_config(config: Config) -> TranslationResult<Self> {
        config
            .validate()
            .map_err(|error| TranslationError::InvalidArgument(error.to_string()))?;
        let engine = engines::create_engine(&config.engine, &config)?;
        Ok(Self::from_parts(engine, config))
    }

    /// Create a translator around an injected engine (custom backends, tests)
    pub fn from_engine(engine: Arc<dyn TranslationEngine>) -> Self {
        let config = Config::for_engine(engine.name());
        Self::from_parts(engine, config)
    }

    /// Create a translator around an injected engine with explicit settings
    pub fn from_engine_with_config(engine: Arc<dyn TranslationEngine>, config: Config) -> Self {
        Self::from_parts(engine, config)
    }

    fn from_parts(engine: Arc<dyn TranslationEngine>, config: Config) -> Self {
        let memo = TranslationMemo::new(config.cache.enabled, config.cache.capacity);
        let service = TranslationService::new(engine, memo, config.translation.clone());
        Self {
            service,
            tags: TranslatableTags::default(),
            config,
        }
    }

    /// Replace the allow-list of translatable tags
    pub fn with_translatable_tags(mut self, tags: TranslatableTags) -> Self {
        self.tags = tags;
        self
    }

    /// Register an additional translatable tag name
    pub fn add_translatable_tag(&mut self, tag: &str) {
        self.tags.insert(tag);
    }

    /// The allow-list used for markup translation
    pub fn translatable_tags(&self) -> &TranslatableTags {
        &self.tags
    }

    /// Names of all registered engines
    pub fn engines() -> &'static [&'static str] {
        engines::available_engines()
    }

    /// Name of the engine this translator uses
    pub fn engine_name(&self) -> &str {
        self.service.engine().name()
    }

    /// Maximum input length per engine call, when the engine reports one
    pub fn input_limit(&self) -> Option<usize> {
        self.service.engine().input_limit()
    }

    /// The memo cache attached to this translator
    pub fn memo(&self) -> &TranslationMemo {
        self.service.memo()
    }

    /// The configuration this translator was built from
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The engine's capability table, fetched lazily and cached per process
    pub async fn language_map(&self) -> Arc<LanguageMap> {
        self.service.language_map().await
    }

    /// Sorted source language codes the engine supports
    pub async fn supported_languages(&self) -> Vec<String> {
        self.language_map().await.source_codes()
    }

    /// Whether the engine supports the given code as a source language
    pub async fn supports_language(&self, code: &str) -> TranslationResult<bool> {
        self.language_map().await.is_supported_source(code)
    }

    /// Target codes reachable from the given source code
    pub async fn supported_target_languages(
        &self,
        source: &str,
    ) -> TranslationResult<HashSet<String>> {
        self.language_map().await.supported_targets(source)
    }

    /// Whether the capability table lists the pair; "auto" is not a table
    /// entry, so pair validation is the place where it is honored
    pub async fn supports_pair(&self, source: &str, target: &str) -> bool {
        let map = self.language_map().await;
        match (normalize_code(source), normalize_code(target)) {
            (Ok(source), Ok(target)) => map.supports_pair(&source, &target),
            _ => false,
        }
    }

    /// Validate a language pair against the engine's capability table
    pub async fn check_languages(
        &self,
        source: &str,
        target: &str,
    ) -> TranslationResult<(String, String)> {
        self.service.check_languages(source, target).await
    }

    /// Detect the language of the given text
    pub async fn detect_language(&self, text: &str) -> TranslationResult<Detection> {
        if text.trim().is_empty() {
            return Err(TranslationError::InvalidArgument(
                "Text for language detection cannot be empty".to_string(),
            ));
        }
        self.service
            .engine()
            .detect(text)
            .await
            .map_err(|error| TranslationError::failed_with("Language detection failed", error))
    }

    /// Translate plain text from `source` to `target`.
    ///
    /// Empty text is returned unchanged. Text longer than the engine's
    /// input limit is chunked at word boundaries and translated with
    /// bounded concurrency; see [`TranslationService::translate_text`].
    pub async fn translate_text(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> TranslationResult<String> {
        self.service.translate_text(text, source, target).await
    }

    /// Translate a markup string, returning the serialized translated markup
    pub async fn translate_markup(
        &self,
        markup: &str,
        source: &str,
        target: &str,
    ) -> TranslationResult<String> {
        if markup.is_empty() {
            return Ok(String::new());
        }

        let dom = parse_markup(markup);
        self.translate_tree(&dom, source, target).await?;
        Ok(serialize_tree(&dom))
    }

    /// Translate markup bytes, decoding and re-encoding with the declared
    /// encoding label. Byte input yields byte output.
    pub async fn translate_markup_bytes(
        &self,
        data: &[u8],
        source: &str,
        target: &str,
        encoding: &str,
    ) -> TranslationResult<Vec<u8>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }

        let dom = parse_markup_bytes(data, encoding)?;
        self.translate_tree(&dom, source, target).await?;
        serialize_tree_bytes(&dom, encoding)
    }

    /// Translate a caller-owned parsed document in place
    pub async fn translate_tree(
        &self,
        dom: &RcDom,
        source: &str,
        target: &str,
    ) -> TranslationResult<()> {
        TreeTranslator::new(&self.service, &self.tags)
            .translate_tree(dom, source, target)
            .await
    }

    /// Translate every translatable node under `root` in place
    pub async fn translate_subtree(
        &self,
        root: &Handle,
        source: &str,
        target: &str,
    ) -> TranslationResult<()> {
        TreeTranslator::new(&self.service, &self.tags)
            .translate_subtree(root, source, target)
            .await
    }

    /// Translate the text content of a single node in place.
    ///
    /// Nodes without direct text, or whose text is blank after trimming,
    /// are left untouched.
    pub async fn translate_node(
        &self,
        node: &Handle,
        source: &str,
        target: &str,
    ) -> TranslationResult<()> {
        let Some(text) = direct_text(node) else {
            return Ok(());
        };
        if text.trim().is_empty() {
            return Ok(());
        }

        let translated = self.service.translate_text(&text, source, target).await?;
        set_direct_text(node, &translated);
        Ok(())
    }

    /// Translate a file in place, routing by detected file kind.
    ///
    /// Markup files (`html`, `htm`, `xhtml`, `shtml`, `xml`) go through the
    /// tree engine; everything else is treated as plain text. Empty files
    /// are left untouched.
    pub async fn translate_file<P: AsRef<Path>>(
        &self,
        path: P,
        source: &str,
        target: &str,
    ) -> TranslationResult<()> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)
            .map_err(|error| TranslationError::failed(error.to_string()))?;
        if content.is_empty() {
            return Ok(());
        }

        let kind = FileManager::detect_kind(path);
        debug!("Translating file {:?} as {:?}", path, kind);

        let translated = match kind {
            FileKind::Markup => self.translate_markup(&content, source, target).await?,
            FileKind::Text => self.translate_text(&content, source, target).await?,
        };

        FileManager::write_to_file(path, &translated)
            .map_err(|error| TranslationError::failed(error.to_string()))
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("engine", &self.engine_name())
            .field("translatable_tags", &self.tags.len())
            .finish()
    }
}

// Re-exported here so facade users rarely need deeper module paths
pub use crate::markup::DEFAULT_TRANSLATABLE_TAGS;

/// Default encoding used by the byte-content entry points
pub const DEFAULT_MARKUP_ENCODING: &str = DEFAULT_ENCODING;
