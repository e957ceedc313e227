use super::types::{Award, AwardKind, Category, InstitutionKind, KnowledgeArea, Region};

fn category_winner(category: Category) -> Award {
    Award {
        id: format!("categoria-{}", category.to_string().to_lowercase()),
        name: format!("Destaque da Categoria {}", category),
        kind: AwardKind::CategoryWinner,
        category: Some(category),
        knowledge_area: None,
        region: None,
        institution: None,
        criteria: format!(
            "Maior nota final entre os projetos da categoria {}",
            category
        ),
    }
}

fn special(id: &str, area: KnowledgeArea) -> Award {
    Award {
        id: format!("destaque-{}", id),
        name: format!("Destaque em {}", area),
        kind: AwardKind::Special,
        category: None,
        knowledge_area: Some(area),
        region: None,
        institution: None,
        criteria: format!("Maior nota final entre os projetos da área de {}", area),
    }
}

fn regional(id: &str, region: Region) -> Award {
    Award {
        id: format!("regional-{}", id),
        name: format!("Destaque Regional {}", region),
        kind: AwardKind::Regional,
        category: None,
        knowledge_area: None,
        region: Some(region),
        institution: None,
        criteria: format!("Maior nota final entre os projetos da região {}", region),
    }
}

fn institutional(id: &str, institution: InstitutionKind) -> Award {
    Award {
        id: format!("institucional-{}", id),
        name: format!("Destaque da {}", institution),
        kind: AwardKind::Institutional,
        category: None,
        knowledge_area: None,
        region: None,
        institution: Some(institution),
        criteria: format!("Maior nota final entre os projetos de escolas da {}", institution),
    }
}

/// The built-in award catalog.
///
/// One category-winner per competitive category (Relato never places), one
/// special award per knowledge area, one per macro-region and one per school
/// network.
pub fn builtin_awards() -> Vec<Award> {
    let mut awards: Vec<Award> = Category::ALL
        .iter()
        .filter(|c| c.is_competitive())
        .map(|c| category_winner(*c))
        .collect();

    awards.push(special("exatas", KnowledgeArea::ExactSciences));
    awards.push(special("vida", KnowledgeArea::LifeSciences));
    awards.push(special("humanas", KnowledgeArea::Humanities));
    awards.push(special("engenharias", KnowledgeArea::Engineering));

    awards.push(regional("norte", Region::Norte));
    awards.push(regional("nordeste", Region::Nordeste));
    awards.push(regional("centro-oeste", Region::CentroOeste));
    awards.push(regional("sudeste", Region::Sudeste));
    awards.push(regional("sul", Region::Sul));

    awards.push(institutional("publica", InstitutionKind::Public));
    awards.push(institutional("privada", InstitutionKind::Private));

    awards
}
