// file: src/composer/response.rs
// description: renders matched records into natural-language answers
// reference: template variants picked by a phrasing strategy

use crate::composer::phrasing::{PhrasingStrategy, RandomPhrasing};
use crate::composer::template::ResponseTemplate;
use crate::models::{LecturerRecord, RectorRecord};
use std::sync::Arc;

const LECTURER_TEMPLATES: [&str; 3] = [
    "NIP dari {dosen} itu adalah {nip}",
    "NIP {nip} itu punya {dosen}",
    "{dosen} punya NIP: {nip}",
];

const RECTOR_TEMPLATES: [&str; 3] = [
    "{nama} menjabat sebagai Rektor UNDIP pada periode {periode}. {keterangan}",
    "Periode {periode}, Rektor UNDIP dijabat oleh {nama}. {keterangan}",
    "{nama} adalah Rektor UNDIP periode {periode}. {keterangan}",
];

#[derive(Clone)]
pub struct ResponseComposer {
    phrasing: Arc<dyn PhrasingStrategy>,
    lecturer_templates: Vec<ResponseTemplate>,
    rector_templates: Vec<ResponseTemplate>,
}

impl ResponseComposer {
    pub fn new(phrasing: Arc<dyn PhrasingStrategy>) -> Self {
        Self {
            phrasing,
            lecturer_templates: LECTURER_TEMPLATES.iter().map(|t| ResponseTemplate::new(*t)).collect(),
            rector_templates: RECTOR_TEMPLATES.iter().map(|t| ResponseTemplate::new(*t)).collect(),
        }
    }

    pub fn compose_lecturer(&self, lecturer: &LecturerRecord) -> String {
        let template = self.pick(&self.lecturer_templates);
        template.generate(&[("dosen", lecturer.name.as_str()), ("nip", lecturer.id_number.as_str())])
    }

    pub fn compose_rector(&self, rector: &RectorRecord) -> String {
        let template = self.pick(&self.rector_templates);
        template.generate(&[
            ("nama", rector.name.as_str()),
            ("periode", rector.term.as_str()),
            ("keterangan", rector.note.as_str()),
        ])
    }

    fn pick<'a>(&self, templates: &'a [ResponseTemplate]) -> &'a ResponseTemplate {
        let index = self.phrasing.choose(templates.len());
        &templates[index.min(templates.len() - 1)]
    }
}

impl Default for ResponseComposer {
    fn default() -> Self {
        Self::new(Arc::new(RandomPhrasing::new()))
    }
}
