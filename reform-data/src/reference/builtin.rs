//! Reference data embedded in the crate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::records::{CstEntry, NcmEntry, RateComparison, Source, TaxRegime};

fn ncm(
    code: &str,
    description: &str,
    unit: &str,
    component_a_rate: Decimal,
    component_b_rate: Decimal,
    notes: &str,
) -> NcmEntry {
    NcmEntry {
        code: code.to_string(),
        description: description.to_string(),
        start_date: None,
        end_date: None,
        act_type: None,
        act_number: None,
        act_year: None,
        csts: Vec::new(),
        component_a_rate: Some(component_a_rate),
        component_b_rate: Some(component_b_rate),
        unit: Some(unit.to_string()),
        notes: Some(notes.to_string()),
    }
}

pub(crate) fn ncm_entries() -> Vec<NcmEntry> {
    vec![
        ncm(
            "2203.00.00",
            "Cervejas de malte",
            "L",
            dec!(18.5),
            dec!(28.3),
            "Sujeito ao Imposto Seletivo",
        ),
        ncm(
            "8471.30.12",
            "Computadores portáteis de peso inferior a 3,5 kg",
            "UN",
            dec!(16.5),
            dec!(12.0),
            "Redução de carga tributária",
        ),
        ncm(
            "0201.10.00",
            "Carnes de bovino, frescas ou refrigeradas, em carcaças",
            "KG",
            dec!(9.25),
            dec!(6.0),
            "Cesta básica - alíquota reduzida",
        ),
        ncm(
            "3004.90.99",
            "Outros medicamentos",
            "UN",
            dec!(12.0),
            dec!(4.0),
            "Redução significativa para medicamentos",
        ),
        ncm(
            "8703.23.10",
            "Automóveis de passageiros, motor explosão, 1000cm³ a 1500cm³",
            "UN",
            dec!(35.0),
            dec!(26.5),
            "Redução moderada",
        ),
    ]
}

pub(crate) fn cst_entries() -> Vec<CstEntry> {
    [
        ("00", "Tributada integralmente", "Operação tributada normalmente"),
        (
            "10",
            "Tributada e com cobrança do ICMS por substituição tributária",
            "Substituição tributária aplicável",
        ),
        (
            "20",
            "Com redução de base de cálculo",
            "Base de cálculo reduzida conforme legislação",
        ),
        (
            "30",
            "Isenta ou não tributada e com cobrança do ICMS por ST",
            "Operação isenta com ST",
        ),
        ("40", "Isenta", "Operação isenta de tributação"),
        ("41", "Não tributada", "Operação não sujeita a tributação"),
        ("50", "Suspensão", "Tributação suspensa"),
        ("51", "Diferimento", "Tributação diferida para momento posterior"),
    ]
    .into_iter()
    .map(|(code, description, notes)| CstEntry {
        code: code.to_string(),
        description: description.to_string(),
        kind: "Entrada/Saída".to_string(),
        notes: notes.to_string(),
    })
    .collect()
}

pub(crate) fn rate_comparisons() -> Vec<RateComparison> {
    [
        (
            "PIS/COFINS",
            "Lei 10.637/2002 e 10.833/2003",
            dec!(9.25),
            dec!(0),
            "Todos (substituído por CBS)",
        ),
        (
            "CBS",
            "EC 132/2023",
            dec!(0),
            dec!(8.8),
            "Federal - substituirá PIS/COFINS/IPI",
        ),
        (
            "ICMS",
            "Constituição Federal",
            dec!(17.0),
            dec!(0),
            "Estadual (substituído por IBS)",
        ),
        (
            "ISS",
            "LC 116/2003",
            dec!(5.0),
            dec!(0),
            "Municipal (substituído por IBS)",
        ),
        (
            "IBS",
            "EC 132/2023",
            dec!(0),
            dec!(17.7),
            "Estadual/Municipal - substituirá ICMS e ISS",
        ),
        (
            "Imposto Seletivo",
            "EC 132/2023",
            dec!(0),
            dec!(1.5),
            "Produtos prejudiciais à saúde/meio ambiente",
        ),
    ]
    .into_iter()
    .map(
        |(tax, legal_basis, component_a_rate, component_b_rate, sector)| RateComparison {
            tax: tax.to_string(),
            legal_basis: legal_basis.to_string(),
            component_a_rate,
            component_b_rate,
            sector: sector.to_string(),
        },
    )
    .collect()
}

pub(crate) fn regimes() -> Vec<TaxRegime> {
    vec![
        TaxRegime {
            name: "Simples Nacional".to_string(),
            description: "A sistemática de tributação unificada será mantida, mas as faixas \
                de receita bruta e as alíquotas serão recalculadas para o modelo IBS/CBS. \
                O recolhimento continua em guia única (DAS), com ajustes graduais entre \
                2026 e 2033."
                .to_string(),
            comparison: "**Antes (2025):**\n\
                - Anexo I (comércio): 4% a 19%\n\
                - Anexo II (indústria): 4,5% a 30%\n\
                - Anexo III (serviços): 6% a 33%\n\n\
                **Depois (2033):**\n\
                - Novas faixas com IBS/CBS integrados\n\
                - Redução estimada de 2 a 5 pontos percentuais\n\
                - Fim do benefício de isenção de ICMS/ISS em alguns Estados"
                .to_string(),
        },
        TaxRegime {
            name: "Lucro Presumido".to_string(),
            description: "PIS e COFINS serão substituídos pela CBS, e ICMS/ISS pelo IBS. \
                A base de cálculo presumida do IRPJ permanece, com novas regras de \
                creditamento para IBS e CBS."
                .to_string(),
            comparison: "**Antes:**\n\
                - PIS/COFINS: 3,65% (cumulativo)\n\
                - ICMS: 12% a 18%\n\
                - ISS: 2% a 5%\n\
                - IRPJ/CSLL: sobre lucro presumido\n\n\
                **Depois:**\n\
                - CBS: ~8,8% (não cumulativo)\n\
                - IBS: ~17,7% (não cumulativo)\n\
                - IRPJ/CSLL: mantidos\n\
                - Direito a crédito integral de IBS/CBS"
                .to_string(),
        },
        TaxRegime {
            name: "Lucro Real".to_string(),
            description: "Regime menos impactado estruturalmente. O sistema não cumulativo \
                de PIS/COFINS dá lugar à CBS e os créditos de ICMS ao IBS, mais simplificado."
                .to_string(),
            comparison: "**Antes:**\n\
                - PIS/COFINS: 9,25% (não cumulativo)\n\
                - ICMS: até 20,5% (crédito parcial)\n\
                - ISS: até 5%\n\
                - IRPJ: 15% + 10%\n\
                - CSLL: 9%\n\n\
                **Depois:**\n\
                - CBS: ~8,8% (crédito amplo)\n\
                - IBS: ~17,7% (crédito integral)\n\
                - IRPJ: 15% + 10%\n\
                - CSLL: 9%"
                .to_string(),
        },
    ]
}

pub(crate) fn sources() -> Vec<Source> {
    [
        (
            "Emenda Constitucional nº 132/2023",
            "Texto oficial da Reforma Tributária",
            "http://www.planalto.gov.br/ccivil_03/constituicao/emendas/emc/emc132.htm",
        ),
        (
            "Receita Federal do Brasil",
            "Portal oficial com orientações e tabelas atualizadas",
            "https://www.gov.br/receitafederal/pt-br",
        ),
        (
            "Ministério da Fazenda",
            "Informações sobre a implementação da reforma",
            "https://www.gov.br/fazenda/pt-br",
        ),
        (
            "Portal do SPED",
            "Sistema Público de Escrituração Digital",
            "http://sped.rfb.gov.br/",
        ),
        (
            "Tabela NCM Completa",
            "Nomenclatura Comum do Mercosul atualizada",
            "https://www.gov.br/receitafederal/pt-br/assuntos/aduana-e-comercio-exterior/manuais/nomenclatura-comum-do-mercosul",
        ),
        (
            "Conselho Nacional de Política Fazendária",
            "CONFAZ - Regulamentação do ICMS e transição para IBS",
            "https://www.confaz.fazenda.gov.br/",
        ),
    ]
    .into_iter()
    .map(|(name, description, url)| Source {
        name: name.to_string(),
        description: description.to_string(),
        url: url.to_string(),
    })
    .collect()
}
