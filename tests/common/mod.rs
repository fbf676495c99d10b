//! Shared fixtures for integration tests.
//!
//! Small training corpora are turned into models on the fly so tests never
//! depend on a shipped model set.

#![allow(dead_code)]

use lingram::{LanguageModel, TrigramExtractor};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Training text per language tag.
pub const CORPORA: &[(&str, &str)] = &[
    (
        "en",
        "The weather was fine and the children were playing in the garden. \
         They went to the market with their mother and bought some bread and \
         cheese. In the evening the whole family was sitting together, talking \
         about the things that had happened during the day. Nothing is more \
         important than the time we spend with the people we love. The \
         government announced that the new law will come into force next year, \
         and the opposition said that they would fight it in the courts.",
    ),
    (
        "de",
        "Das Wetter war schön und die Kinder spielten im Garten. Sie gingen mit \
         ihrer Mutter auf den Markt und kauften Brot und Käse. Am Abend saß die \
         ganze Familie zusammen und sprach über die Dinge, die während des Tages \
         geschehen waren. Nichts ist wichtiger als die Zeit, die wir mit den \
         Menschen verbringen, die wir lieben. Die Regierung kündigte an, dass \
         das neue Gesetz im nächsten Jahr in Kraft treten wird, und die \
         Opposition sagte, dass sie dagegen vor Gericht ziehen werde.",
    ),
    (
        "fr",
        "Le temps était beau et les enfants jouaient dans le jardin. Ils sont \
         allés au marché avec leur mère et ont acheté du pain et du fromage. Le \
         soir, toute la famille était assise ensemble et parlait des choses qui \
         s'étaient passées pendant la journée. Rien n'est plus important que le \
         temps que nous passons avec les personnes que nous aimons. Le \
         gouvernement a annoncé que la nouvelle loi entrera en vigueur l'année \
         prochaine, et l'opposition a déclaré qu'elle la contesterait devant les \
         tribunaux.",
    ),
    (
        "ru",
        "Погода была хорошая, и дети играли в саду. Они пошли на рынок с мамой \
         и купили хлеб и сыр. Вечером вся семья сидела вместе и говорила о том, \
         что произошло за день. Нет ничего важнее времени, которое мы проводим \
         с людьми, которых любим. Правительство объявило, что новый закон \
         вступит в силу в следующем году, а оппозиция заявила, что будет \
         оспаривать его в суде.",
    ),
];

pub fn models() -> Vec<LanguageModel> {
    let extractor = TrigramExtractor::default();
    CORPORA
        .iter()
        .map(|(tag, text)| LanguageModel::from_text(*tag, text, &extractor))
        .collect()
}

/// Temp directory holding one `<tag>.model` file per corpus.
pub fn model_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    for mut model in models() {
        model.save(dir.path()).unwrap();
    }
    dir
}

pub fn model_path(dir: &Path, tag: &str) -> PathBuf {
    LanguageModel::path_in(dir, tag)
}
