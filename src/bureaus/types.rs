//! Receita Federal API response types
//! Mapping of the `api-cnpj-empresa/v2` company record
//!
//! Reference: https://apigateway.conectagov.estaleiro.serpro.gov.br/api-cnpj-empresa/v2/empresa/{cnpj}
//!
//! Every record decodes on its own: missing keys and `null` values fall back
//! to empty strings, records and lists.

use serde::{Deserialize, Deserializer, Serialize};

/// Company record as returned by the bureau.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Empresa {
    #[serde(deserialize_with = "null_as_default")]
    pub ni: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tipo_estabelecimento: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nome_empresarial: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nome_fantasia: String,

    #[serde(deserialize_with = "null_as_default")]
    pub situacao_cadastral: SituacaoCadastral,

    #[serde(deserialize_with = "null_as_default")]
    pub natureza_juridica: NaturezaJuridica,

    #[serde(deserialize_with = "null_as_default")]
    pub data_abertura: String,

    #[serde(deserialize_with = "null_as_default")]
    pub cnae_principal: Cnae,

    #[serde(deserialize_with = "null_as_default")]
    pub cnae_secundarias: Vec<Cnae>,

    #[serde(deserialize_with = "null_as_default")]
    pub endereco: Endereco,

    #[serde(deserialize_with = "null_as_default")]
    pub municipio_jurisdicao: MunicipioCodigo,

    #[serde(deserialize_with = "null_as_default")]
    pub telefone: Vec<Telefone>,

    #[serde(deserialize_with = "null_as_default")]
    pub correio_eletronico: String,
    #[serde(deserialize_with = "null_as_default")]
    pub capital_social: String,
    #[serde(deserialize_with = "null_as_default")]
    pub porte: String,
    #[serde(deserialize_with = "null_as_default")]
    pub situacao_especial: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data_situacao_especial: String,

    #[serde(deserialize_with = "null_as_default")]
    pub informacoes_adicionais: InformacoesAdicionais,

    #[serde(deserialize_with = "null_as_default")]
    pub lista_periodo_simples: Vec<PeriodoSimples>,

    #[serde(deserialize_with = "null_as_default")]
    pub socios: Vec<Socio>,
}

/// Registration status of the company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SituacaoCadastral {
    #[serde(deserialize_with = "null_as_default")]
    pub codigo: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data: String,
    #[serde(deserialize_with = "null_as_default")]
    pub motivo: String,
}

/// Legal nature of the company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NaturezaJuridica {
    #[serde(deserialize_with = "null_as_default")]
    pub codigo: String,
    #[serde(deserialize_with = "null_as_default")]
    pub descricao: String,
}

/// National economic-activity classification (CNAE).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Cnae {
    #[serde(deserialize_with = "null_as_default")]
    pub codigo: String,
    #[serde(deserialize_with = "null_as_default")]
    pub descricao: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Endereco {
    #[serde(deserialize_with = "null_as_default")]
    pub tipo_logradouro: String,
    #[serde(deserialize_with = "null_as_default")]
    pub logradouro: String,
    #[serde(deserialize_with = "null_as_default")]
    pub numero: String,
    #[serde(deserialize_with = "null_as_default")]
    pub complemento: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cep: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bairro: String,

    #[serde(deserialize_with = "null_as_default")]
    pub municipio: MunicipioCodigo,

    #[serde(deserialize_with = "null_as_default")]
    pub pais: MunicipioCodigo,
}

/// Code/description pair used for cities and countries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MunicipioCodigo {
    #[serde(deserialize_with = "null_as_default")]
    pub codigo: String,
    #[serde(deserialize_with = "null_as_default")]
    pub descricao: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Telefone {
    #[serde(deserialize_with = "null_as_default")]
    pub ddd: String,
    #[serde(deserialize_with = "null_as_default")]
    pub numero: String,
}

/// Tax-regime flags (Simples Nacional / MEI).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InformacoesAdicionais {
    #[serde(deserialize_with = "null_as_default")]
    pub optante_simples: String,
    #[serde(deserialize_with = "null_as_default")]
    pub optante_mei: String,
}

/// A period in which the company opted into Simples Nacional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PeriodoSimples {
    #[serde(deserialize_with = "null_as_default")]
    pub data_inicio: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data_fim: String,
}

/// Partner / shareholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Socio {
    #[serde(deserialize_with = "null_as_default")]
    pub tipo_socio: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cpf: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nome: String,
    #[serde(deserialize_with = "null_as_default")]
    pub qualificacao: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data_inclusao: String,

    #[serde(deserialize_with = "null_as_default")]
    pub pais: MunicipioCodigo,

    #[serde(deserialize_with = "null_as_default")]
    pub representante_legal: RepresentanteLegal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RepresentanteLegal {
    #[serde(deserialize_with = "null_as_default")]
    pub cpf: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nome: String,
    #[serde(deserialize_with = "null_as_default")]
    pub qualificacao: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_record() -> serde_json::Value {
        json!({
            "ni": "57348459000106",
            "tipoEstabelecimento": "1",
            "nomeEmpresarial": "JOJO COMERCIO LTDA",
            "nomeFantasia": "JOJO",
            "situacaoCadastral": { "codigo": "2", "data": "2005-11-03", "motivo": "" },
            "naturezaJuridica": { "codigo": "2062", "descricao": "Sociedade Empresaria Limitada" },
            "dataAbertura": "2005-11-03",
            "cnaePrincipal": { "codigo": "4751201", "descricao": "Comercio varejista" },
            "cnaeSecundarias": [
                { "codigo": "9511800", "descricao": "Reparacao de computadores" }
            ],
            "endereco": {
                "tipoLogradouro": "RUA",
                "logradouro": "DAS FLORES",
                "numero": "100",
                "complemento": "SALA 2",
                "cep": "01001000",
                "bairro": "CENTRO",
                "municipio": { "codigo": "7107", "descricao": "SAO PAULO" },
                "pais": { "codigo": "105", "descricao": "BRASIL" }
            },
            "municipioJurisdicao": { "codigo": "0818000", "descricao": "SAO PAULO" },
            "telefone": [ { "ddd": "11", "numero": "33334444" } ],
            "correioEletronico": "contato@jojo.com.br",
            "capitalSocial": "10000",
            "porte": "01",
            "situacaoEspecial": "",
            "dataSituacaoEspecial": "",
            "informacoesAdicionais": { "optanteSimples": "S", "optanteMei": "N" },
            "listaPeriodoSimples": [ { "dataInicio": "2007-07-01", "dataFim": "2010-12-31" } ],
            "socios": [
                {
                    "tipoSocio": "2",
                    "cpf": "47109202810",
                    "nome": "JOANA JOJO",
                    "qualificacao": "49",
                    "dataInclusao": "2005-11-03",
                    "pais": { "codigo": "105", "descricao": "BRASIL" },
                    "representanteLegal": { "cpf": "", "nome": "", "qualificacao": "00" }
                }
            ]
        })
    }

    #[test]
    fn test_full_record_survives_encode_decode() {
        let source = full_record();
        let empresa: Empresa = serde_json::from_value(source.clone()).unwrap();

        assert_eq!(empresa.nome_empresarial, "JOJO COMERCIO LTDA");
        assert_eq!(empresa.endereco.municipio.descricao, "SAO PAULO");
        assert_eq!(empresa.socios.len(), 1);
        assert_eq!(empresa.socios[0].representante_legal.qualificacao, "00");
        assert_eq!(empresa.lista_periodo_simples[0].data_fim, "2010-12-31");

        let encoded = serde_json::to_value(&empresa).unwrap();
        assert_eq!(encoded, source);

        let decoded: Empresa = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, empresa);
    }

    #[test]
    fn test_absent_lists_decode_empty() {
        let empresa: Empresa =
            serde_json::from_value(json!({ "nomeEmpresarial": "Company Jojo" })).unwrap();

        assert_eq!(empresa.nome_empresarial, "Company Jojo");
        assert!(empresa.socios.is_empty());
        assert!(empresa.cnae_secundarias.is_empty());
        assert_eq!(empresa.endereco, Endereco::default());

        let encoded = serde_json::to_value(&empresa).unwrap();
        assert_eq!(encoded["socios"], json!([]));
        assert_eq!(encoded["cnaeSecundarias"], json!([]));
    }

    #[test]
    fn test_null_nested_records_decode_empty() {
        let empresa: Empresa = serde_json::from_value(json!({
            "nomeEmpresarial": "Company Jojo",
            "socios": null,
            "cnaeSecundarias": null,
            "endereco": null,
            "informacoesAdicionais": null
        }))
        .unwrap();

        assert!(empresa.socios.is_empty());
        assert!(empresa.cnae_secundarias.is_empty());
        assert_eq!(empresa.informacoes_adicionais, InformacoesAdicionais::default());
    }

    #[test]
    fn test_null_strings_decode_empty() {
        let empresa: Empresa = serde_json::from_str(
            r#"{
                "nomeEmpresarial": "Company Jojo",
                "situacaoEspecial": null,
                "dataSituacaoEspecial": null,
                "correioEletronico": null,
                "endereco": { "logradouro": "DAS FLORES", "complemento": null },
                "socios": [ { "nome": "JOANA JOJO", "cpf": null,
                              "representanteLegal": { "nome": null } } ]
            }"#,
        )
        .unwrap();

        assert_eq!(empresa.nome_empresarial, "Company Jojo");
        assert_eq!(empresa.situacao_especial, "");
        assert_eq!(empresa.data_situacao_especial, "");
        assert_eq!(empresa.correio_eletronico, "");
        assert_eq!(empresa.endereco.logradouro, "DAS FLORES");
        assert_eq!(empresa.endereco.complemento, "");
        assert_eq!(empresa.socios[0].nome, "JOANA JOJO");
        assert_eq!(empresa.socios[0].cpf, "");
        assert_eq!(empresa.socios[0].representante_legal.nome, "");
    }

    #[test]
    fn test_schema_mismatch_is_rejected() {
        let result = serde_json::from_value::<Empresa>(json!({ "socios": "none" }));
        assert!(result.is_err());
    }
}
