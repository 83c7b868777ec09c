use idiom_service::idiom::Idiom;

pub fn idiom(word: &str, pinyin: &str, explanation: &str) -> Idiom {
    Idiom {
        word: word.to_string(),
        pinyin: pinyin.to_string(),
        explanation: explanation.to_string(),
        ..Idiom::default()
    }
}

pub fn sample_idioms() -> Vec<Idiom> {
    vec![
        Idiom {
            word: "一马当先".to_string(),
            pinyin: "yī mǎ dāng xiān".to_string(),
            explanation: "原指作战时策马冲锋在前。现也比喻工作走在群众前面，起带头作用。".to_string(),
            derivation: "明·施耐庵《水浒全传》第五十七回".to_string(),
            example: "他在工作中总是一马当先。".to_string(),
            abbreviation: "ymdx".to_string(),
        },
        idiom("一马平川", "yī mǎ píng chuān", "可以纵马驰骋的一片平地。"),
        idiom("二三其德", "èr sān qí dé", "指三心二意，不专一。"),
        idiom("一马当千", "yī mǎ dāng qiān", "一人可抵挡千人。"),
    ]
}
