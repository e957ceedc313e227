use super::types::{Category, Criterion, Rubric, Stage};

// Criterion display names. Raw score sheets key scores by these exact strings,
// so they live in one place.
pub const METODO_CIENTIFICO: &str = "Método Científico";
pub const ADEQUACAO_REGULAMENTO: &str = "Adequação ao Regulamento";
pub const CLAREZA_RESUMO: &str = "Clareza e Objetividade do Resumo";
pub const RELEVANCIA_TEMA: &str = "Relevância do Tema";
pub const CLAREZA_APRESENTACAO: &str = "Clareza na Apresentação";
pub const CRIATIVIDADE_INOVACAO: &str = "Criatividade e Inovação";
pub const REFERENCIAS: &str = "Referências Bibliográficas";
pub const ARGUMENTACAO: &str = "Argumentação";
pub const CONHECIMENTO_DESENVOLTURA: &str = "Conhecimento e Desenvoltura";
pub const RELEVANCIA_SOCIAL: &str = "Relevância Social";
pub const PROFUNDIDADE_PESQUISA: &str = "Profundidade da Pesquisa";
pub const ORGANIZACAO_ESTANDE: &str = "Organização do Estande";
pub const TRABALHO_EQUIPE: &str = "Trabalho em Equipe";
pub const RELATO_PRATICA: &str = "Relato da Prática";

const ELEMENTARY: [Category; 2] = [Category::I, Category::II];
const MIDDLE: [Category; 4] = [Category::III, Category::IV, Category::V, Category::VI];
const UPPER: [Category; 2] = [Category::VII, Category::VIII];

fn c(name: &str, weight: f64, description: &str) -> Criterion {
    Criterion {
        name: name.to_string(),
        weight,
        description: description.to_string(),
    }
}

fn rubric(category: Category, stage: Stage, criteria: Vec<Criterion>) -> Rubric {
    Rubric {
        category,
        stage,
        criteria,
    }
}

fn submission_criteria() -> Vec<Criterion> {
    vec![
        c(
            ADEQUACAO_REGULAMENTO,
            25.0,
            "Enquadramento do projeto na categoria e no regulamento da feira",
        ),
        c(
            METODO_CIENTIFICO,
            35.0,
            "Clareza do problema, das hipóteses e do procedimento investigativo",
        ),
        c(CLAREZA_RESUMO, 25.0, "Qualidade e objetividade do resumo submetido"),
        c(RELEVANCIA_TEMA, 15.0, "Pertinência do tema para a comunidade escolar"),
    ]
}

fn relato_submission_criteria() -> Vec<Criterion> {
    vec![
        c(
            ADEQUACAO_REGULAMENTO,
            30.0,
            "Enquadramento do relato no regulamento da feira",
        ),
        c(RELATO_PRATICA, 40.0, "Consistência do relato da prática pedagógica"),
        c(CLAREZA_RESUMO, 30.0, "Qualidade e objetividade do resumo submetido"),
    ]
}

fn elementary_virtual_criteria() -> Vec<Criterion> {
    vec![
        c(
            METODO_CIENTIFICO,
            35.0,
            "Clareza do problema, das hipóteses e do procedimento investigativo",
        ),
        c(
            CLAREZA_APRESENTACAO,
            25.0,
            "Organização e objetividade da apresentação gravada",
        ),
        c(CRIATIVIDADE_INOVACAO, 15.0, "Originalidade da abordagem e da solução"),
        c(REFERENCIAS, 10.0, "Uso e citação adequados das fontes"),
        c(ARGUMENTACAO, 15.0, "Domínio do tema ao responder às perguntas da banca"),
    ]
}

fn middle_virtual_criteria() -> Vec<Criterion> {
    vec![
        c(
            METODO_CIENTIFICO,
            30.0,
            "Clareza do problema, das hipóteses e do procedimento investigativo",
        ),
        c(
            CONHECIMENTO_DESENVOLTURA,
            38.0,
            "Domínio do conteúdo e segurança na arguição",
        ),
        c(CRIATIVIDADE_INOVACAO, 12.0, "Originalidade da abordagem e da solução"),
        c(RELEVANCIA_SOCIAL, 12.0, "Impacto potencial para a comunidade"),
        c(
            CLAREZA_APRESENTACAO,
            8.0,
            "Organização e objetividade da apresentação gravada",
        ),
    ]
}

fn upper_virtual_criteria() -> Vec<Criterion> {
    vec![
        c(
            METODO_CIENTIFICO,
            30.0,
            "Clareza do problema, das hipóteses e do procedimento investigativo",
        ),
        c(
            CONHECIMENTO_DESENVOLTURA,
            30.0,
            "Domínio do conteúdo e segurança na arguição",
        ),
        c(CRIATIVIDADE_INOVACAO, 15.0, "Originalidade da abordagem e da solução"),
        c(RELEVANCIA_SOCIAL, 15.0, "Impacto potencial para a comunidade"),
        c(PROFUNDIDADE_PESQUISA, 10.0, "Extensão e rigor da investigação"),
    ]
}

fn elementary_presential_criteria() -> Vec<Criterion> {
    vec![
        c(
            CONHECIMENTO_DESENVOLTURA,
            38.0,
            "Domínio do conteúdo e segurança na arguição",
        ),
        c(
            METODO_CIENTIFICO,
            30.0,
            "Clareza do problema, das hipóteses e do procedimento investigativo",
        ),
        c(ORGANIZACAO_ESTANDE, 12.0, "Montagem do estande, banner e caderno de campo"),
        c(CRIATIVIDADE_INOVACAO, 12.0, "Originalidade da abordagem e da solução"),
        c(TRABALHO_EQUIPE, 8.0, "Participação equilibrada dos integrantes"),
    ]
}

fn middle_presential_criteria() -> Vec<Criterion> {
    vec![
        c(
            CONHECIMENTO_DESENVOLTURA,
            35.0,
            "Domínio do conteúdo e segurança na arguição",
        ),
        c(
            METODO_CIENTIFICO,
            30.0,
            "Clareza do problema, das hipóteses e do procedimento investigativo",
        ),
        c(ORGANIZACAO_ESTANDE, 15.0, "Montagem do estande, banner e caderno de campo"),
        c(RELEVANCIA_SOCIAL, 12.0, "Impacto potencial para a comunidade"),
        c(TRABALHO_EQUIPE, 8.0, "Participação equilibrada dos integrantes"),
    ]
}

fn upper_presential_criteria() -> Vec<Criterion> {
    vec![
        c(
            CONHECIMENTO_DESENVOLTURA,
            32.0,
            "Domínio do conteúdo e segurança na arguição",
        ),
        c(
            METODO_CIENTIFICO,
            30.0,
            "Clareza do problema, das hipóteses e do procedimento investigativo",
        ),
        c(PROFUNDIDADE_PESQUISA, 18.0, "Extensão e rigor da investigação"),
        c(ORGANIZACAO_ESTANDE, 12.0, "Montagem do estande, banner e caderno de campo"),
        c(TRABALHO_EQUIPE, 8.0, "Participação equilibrada dos integrantes"),
    ]
}

fn relato_presential_criteria() -> Vec<Criterion> {
    vec![
        c(RELATO_PRATICA, 40.0, "Consistência do relato da prática pedagógica"),
        c(
            CLAREZA_APRESENTACAO,
            30.0,
            "Organização e objetividade da apresentação",
        ),
        c(RELEVANCIA_SOCIAL, 30.0, "Impacto da prática para a comunidade escolar"),
    ]
}

/// The built-in rubric tables.
///
/// Category I/II virtual evaluation carries the 35% scientific-method weight;
/// the historically circulated 30% variant sums to 95 and is rejected by the
/// catalog's weight-sum check. The Relato track has no virtual rubric.
pub fn builtin_rubrics() -> Vec<Rubric> {
    let mut rubrics = Vec::new();

    for category in Category::ALL {
        let criteria = if category.is_competitive() {
            submission_criteria()
        } else {
            relato_submission_criteria()
        };
        rubrics.push(rubric(category, Stage::Submission, criteria));
    }

    for category in ELEMENTARY {
        rubrics.push(rubric(category, Stage::Virtual, elementary_virtual_criteria()));
        rubrics.push(rubric(
            category,
            Stage::Presential,
            elementary_presential_criteria(),
        ));
    }

    for category in MIDDLE {
        rubrics.push(rubric(category, Stage::Virtual, middle_virtual_criteria()));
        rubrics.push(rubric(category, Stage::Presential, middle_presential_criteria()));
    }

    for category in UPPER {
        rubrics.push(rubric(category, Stage::Virtual, upper_virtual_criteria()));
        rubrics.push(rubric(category, Stage::Presential, upper_presential_criteria()));
    }

    rubrics.push(rubric(
        Category::Relato,
        Stage::Presential,
        relato_presential_criteria(),
    ));

    rubrics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_rubric_sums_to_100() {
        for rubric in builtin_rubrics() {
            let sum = rubric.weight_sum();
            assert!(
                (sum - 100.0).abs() <= 0.01,
                "rubric {}/{} sums to {}",
                rubric.category,
                rubric.stage,
                sum
            );
        }
    }

    #[test]
    fn test_builtin_coverage() {
        let rubrics = builtin_rubrics();

        // Every category has a submission rubric.
        for category in Category::ALL {
            assert!(rubrics
                .iter()
                .any(|r| r.category == category && r.stage == Stage::Submission));
        }

        // Every competitive category has virtual and presential rubrics.
        for category in Category::ALL.iter().filter(|c| c.is_competitive()) {
            assert!(rubrics
                .iter()
                .any(|r| r.category == *category && r.stage == Stage::Virtual));
            assert!(rubrics
                .iter()
                .any(|r| r.category == *category && r.stage == Stage::Presential));
        }

        // Relato is presented in person but has no virtual round.
        assert!(!rubrics
            .iter()
            .any(|r| r.category == Category::Relato && r.stage == Stage::Virtual));
        assert!(rubrics
            .iter()
            .any(|r| r.category == Category::Relato && r.stage == Stage::Presential));
    }

    #[test]
    fn test_no_duplicate_pairs() {
        let rubrics = builtin_rubrics();
        for (i, a) in rubrics.iter().enumerate() {
            for b in &rubrics[i + 1..] {
                assert!(
                    !(a.category == b.category && a.stage == b.stage),
                    "duplicate rubric for {}/{}",
                    a.category,
                    a.stage
                );
            }
        }
    }

    #[test]
    fn test_criteria_order_is_declared_order() {
        let rubrics = builtin_rubrics();
        let rubric = rubrics
            .iter()
            .find(|r| r.category == Category::III && r.stage == Stage::Virtual)
            .unwrap();
        let names: Vec<&str> = rubric.criteria.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                METODO_CIENTIFICO,
                CONHECIMENTO_DESENVOLTURA,
                CRIATIVIDADE_INOVACAO,
                RELEVANCIA_SOCIAL,
                CLAREZA_APRESENTACAO,
            ]
        );
    }
}
