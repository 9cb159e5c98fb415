//! The questionnaire graph.
//!
//! Both branches of every step point to the same successor; the graph is
//! kept as a graph so branching questions can be added without touching the
//! controller.

use crate::model::Step;

pub static STEPS: &[Step] = &[
    Step {
        id: "immobili",
        question: "L’ente dispone o gestisce uno o più immobili?",
        help: "Indicare sedi, immobili in gestione o in comodato d'uso.",
        next_yes: Some("consumi"),
        next_no: Some("consumi"),
    },
    Step {
        id: "consumi",
        question: "Esistono consumi elettrici significativi sulle sedi?",
        help: "Valutare bollette, potenza installata e costi annuali.",
        next_yes: Some("fotovoltaico"),
        next_no: Some("fotovoltaico"),
    },
    Step {
        id: "fotovoltaico",
        question: "È presente o valutabile un impianto FV (anche su copertura)?",
        help: "Anche solo pre-fattibilità o spazi potenzialmente idonei.",
        next_yes: Some("impianti_termici"),
        next_no: Some("impianti_termici"),
    },
    Step {
        id: "impianti_termici",
        question: "L’ente ha impianti termici da sostituire o riqualificare (PDC, caldaie, ecc.) con interesse a incentivi?",
        help: "Conto Termico, bandi e incentivi per riqualificazione energetica.",
        next_yes: Some("rigenerazione"),
        next_no: Some("rigenerazione"),
    },
    Step {
        id: "rigenerazione",
        question: "L’ente intende attivare un percorso di rigenerazione immobiliare (adeguamento, riqualificazione, manutenzione straordinaria)?",
        help: "Valutiamo impatti su spazi, servizi e sostenibilità economica.",
        next_yes: Some("documenti"),
        next_no: Some("documenti"),
    },
    Step {
        id: "documenti",
        question: "Sono disponibili documenti base (titolo disponibilità immobile, bollette, dati catastali)?",
        help: "Serve per accelerare la valutazione tecnica preliminare.",
        next_yes: Some("cer"),
        next_no: Some("cer"),
    },
    Step {
        id: "cer",
        question: "L’ente è interessato a CER/CEC per la condivisione di energia?",
        help: "Comunità Energetiche per ottimizzare produzione e consumi.",
        next_yes: Some("governance"),
        next_no: Some("governance"),
    },
    Step {
        id: "governance",
        question: "L’ente necessita supporto per governance, delibere e atti deliberativi?",
        help: "Supportiamo la formalizzazione delle decisioni e del percorso.",
        next_yes: Some("vincoli"),
        next_no: Some("vincoli"),
    },
    Step {
        id: "vincoli",
        question: "Sono presenti vincoli (tutela, autorizzazioni, vincoli urbanistici) noti?",
        help: "Informazioni utili per evitare rallentamenti.",
        next_yes: Some("certo_user"),
        next_no: Some("certo_user"),
    },
    Step {
        id: "certo_user",
        question: "L’ente vuole una presa in carico operativa su CERtoUSER?",
        help: "Attivazione percorso operativo con team dedicato.",
        next_yes: None,
        next_no: None,
    },
];

pub fn first() -> &'static Step {
    &STEPS[0]
}

pub fn find(id: &str) -> Option<&'static Step> {
    STEPS.iter().find(|step| step.id == id)
}

/// Resolve a step id, falling back to the first step for unknown ids.
pub fn resolve(id: &str) -> &'static Step {
    find(id).unwrap_or_else(first)
}

pub fn total() -> usize {
    STEPS.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = STEPS.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), STEPS.len());
        assert_eq!(total(), 10);
    }

    #[test]
    fn test_pointers_resolve() {
        for step in STEPS {
            for next in [step.next_yes, step.next_no].into_iter().flatten() {
                assert!(find(next).is_some(), "{} points to unknown {}", step.id, next);
            }
        }
    }

    #[test]
    fn test_only_last_step_is_terminal() {
        let terminal: Vec<_> = STEPS.iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(terminal.len(), 1);
        assert_eq!(terminal[0].id, "certo_user");
    }

    #[test]
    fn test_resolve_unknown_falls_back() {
        assert_eq!(resolve("cer").id, "cer");
        assert_eq!(resolve("deleted_step").id, "immobili");
        assert_eq!(resolve("").id, "immobili");
    }
}
