//! Start-tag scanning of the V8 CI pages.
//!
//! Only the tokenizer is used, no tree is built. Tags are seen in document order
//! exactly as written, which is what the matching rules below depend on.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

use crate::config::Endpoints;
use crate::errors::FetchError;
use crate::utils::download::Fetcher;

/// Receives every start tag of a document.
trait StartTagHandler {
    fn start_tag(&mut self, tag: &Tag);
}

struct StartTags<H>(H);

impl<H: StartTagHandler> TokenSink for StartTags<H> {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) if tag.kind == TagKind::StartTag => {
                self.0.start_tag(&tag);
                // Script and style bodies are text; without a tree builder the
                // tokenizer has to be told.
                match &*tag.name {
                    "script" => TokenSinkResult::RawData(RawKind::ScriptData),
                    "style" => TokenSinkResult::RawData(RawKind::Rawtext),
                    _ => TokenSinkResult::Continue,
                }
            }
            _ => TokenSinkResult::Continue,
        }
    }
}

fn scan<H: StartTagHandler>(handler: H, html: &str) -> H {
    let mut tokenizer = Tokenizer::new(StartTags(handler), TokenizerOpts::default());
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(html));
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();
    tokenizer.sink.0
}

fn attr<'t>(tag: &'t Tag, name: &str) -> Option<&'t str> {
    tag.attrs
        .iter()
        .find(|a| &*a.name.local == name)
        .map(|a| &*a.value)
}

struct SuccessBuildLink<'o> {
    origin: &'o str,
    armed: bool,
    url: Option<String>,
}

impl StartTagHandler for SuccessBuildLink<'_> {
    fn start_tag(&mut self, tag: &Tag) {
        if self.url.is_some() {
            return;
        }
        if let [only] = tag.attrs.as_slice() {
            if &*only.name.local == "class" && &*only.value == "status SUCCESS" {
                self.armed = true;
            }
        }
        if self.armed && &*tag.name == "a" {
            // An armed anchor without href does not end the search; the next
            // anchor that has one is taken instead.
            if let Some(href) = attr(tag, "href") {
                self.url = Some(format!("{}{}", self.origin, href));
            }
        }
    }
}

/// Link of the first anchor at or after the first tag whose only attribute is
/// `class="status SUCCESS"`, prefixed with `origin`. Later SUCCESS rows are ignored.
pub fn latest_success_build(html: &str, origin: &str) -> Option<String> {
    scan(
        SuccessBuildLink {
            origin,
            armed: false,
            url: None,
        },
        html,
    )
    .url
}

struct ArtifactLink<'p> {
    prefix: &'p str,
    url: Option<String>,
}

impl StartTagHandler for ArtifactLink<'_> {
    fn start_tag(&mut self, tag: &Tag) {
        if let Some(third) = tag.attrs.get(2) {
            let value = &*third.value;
            if !value.is_empty() && value.starts_with(self.prefix) {
                self.url = Some(value.to_string());
            }
        }
    }
}

/// Value of the third attribute of the last tag where it starts with `prefix`.
///
/// This keeps the last match while [`latest_success_build`] keeps the first. The
/// two rules look like a historical inconsistency but are left as they are.
pub fn artifact_zip(html: &str, prefix: &str) -> Option<String> {
    scan(ArtifactLink { prefix, url: None }, html).url
}

pub fn find_latest_success_build_url(
    fetcher: &Fetcher,
    endpoints: &Endpoints,
) -> Result<String, FetchError> {
    let html = fetcher.fetch_text(&endpoints.v8_builder_page)?;
    latest_success_build(&html, &endpoints.ci_origin).ok_or_else(|| {
        FetchError::scrape(format!(
            "no successful build listed on {}",
            endpoints.v8_builder_page
        ))
    })
}

pub fn find_artifact_zip_url(
    fetcher: &Fetcher,
    endpoints: &Endpoints,
    build_url: &str,
) -> Result<String, FetchError> {
    let html = fetcher.fetch_text(build_url)?;
    artifact_zip(&html, &endpoints.v8_artifact_prefix).ok_or_else(|| {
        FetchError::scrape(format!(
            "no {} artifact linked from {}",
            endpoints.v8_artifact_prefix, build_url
        ))
    })
}
