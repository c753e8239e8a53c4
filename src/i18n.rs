use std::cell::Cell;

use crate::preferences::Language;

/// Resolves translation keys for the active locale.
pub trait Translator {
    fn set_locale(&self, language: Language);

    fn locale(&self) -> Language;

    fn translate(&self, key: &str) -> String;
}

/// Built-in string tables for the site copy.
#[derive(Debug, Default)]
pub struct Catalog {
    locale: Cell<Language>,
}

impl Catalog {
    pub fn new(locale: Language) -> Self {
        Self {
            locale: Cell::new(locale),
        }
    }

    fn table(language: Language) -> &'static [(&'static str, &'static str)] {
        match language {
            Language::En => EN,
            Language::Fr => FR,
        }
    }

    fn lookup(language: Language, key: &str) -> Option<&'static str> {
        Self::table(language)
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| *value)
    }
}

impl Translator for Catalog {
    fn set_locale(&self, language: Language) {
        self.locale.set(language);
    }

    fn locale(&self) -> Language {
        self.locale.get()
    }

    fn translate(&self, key: &str) -> String {
        let locale = self.locale.get();
        Self::lookup(locale, key)
            .or_else(|| Self::lookup(Language::En, key))
            .map(str::to_string)
            .unwrap_or_else(|| {
                tracing::debug!("i18n: missing key {key} for {locale}");
                key.to_string()
            })
    }
}

const EN: &[(&str, &str)] = &[
    ("nav.home", "Home"),
    ("nav.services", "Services"),
    ("nav.about", "About"),
    ("nav.contact", "Contact"),
    ("nav.toggleMenu", "Toggle menu"),
    ("nav.switchLanguage", "Switch to French"),
    ("nav.darkMode", "Switch to dark mode"),
    ("nav.lightMode", "Switch to light mode"),
    ("hero.title", "Technology that works as hard as you do"),
    (
        "hero.subtitle",
        "Pladd helps growing businesses secure, support and scale their IT, from the help desk to the cloud.",
    ),
    ("hero.cta", "Explore our services"),
    ("hero.contact", "Talk to an expert"),
    ("services.title", "What we do"),
    (
        "services.subtitle",
        "End-to-end consulting for teams that want their technology to stay out of the way.",
    ),
    ("services.cybersecurity.title", "Cybersecurity"),
    (
        "services.cybersecurity.description",
        "Audits, hardening and monitoring that keep your data and your reputation safe.",
    ),
    ("services.techSupport.title", "Tech support"),
    (
        "services.techSupport.description",
        "Responsive help desk and on-site support for every device in your office.",
    ),
    ("services.cloudServices.title", "Cloud services"),
    (
        "services.cloudServices.description",
        "Migrations, backups and cost control for the platforms you rely on.",
    ),
    ("services.networkSolutions.title", "Network solutions"),
    (
        "services.networkSolutions.description",
        "Fast, reliable networks designed, installed and maintained by certified engineers.",
    ),
    ("stats.title", "Trusted by businesses across the region"),
    ("stats.clients", "Satisfied clients"),
    ("stats.issues", "Issues resolved"),
    ("stats.uptime", "Network uptime"),
    ("testimonials.title", "What our clients say"),
    (
        "testimonials.testimonial1.quote",
        "Pladd rebuilt our network over a weekend. Monday morning everything simply worked.",
    ),
    ("testimonials.testimonial1.author", "Marie Tremblay"),
    ("testimonials.testimonial1.company", "Tremblay & Associates"),
    (
        "testimonials.testimonial2.quote",
        "Their security audit found problems we had no idea existed, and they fixed them fast.",
    ),
    ("testimonials.testimonial2.author", "David Chen"),
    ("testimonials.testimonial2.company", "Northwind Logistics"),
    ("contact.title", "Get in touch"),
    (
        "contact.subtitle",
        "Tell us about your project and we will get back to you within one business day.",
    ),
    ("contact.name", "Name"),
    ("contact.email", "Email"),
    ("contact.phone", "Phone"),
    ("contact.message", "Message"),
    ("contact.submit", "Send message"),
    ("contact.sending", "Sending..."),
    ("contact.success", "Thanks! Your message has been sent."),
    ("contact.required", "This field is required"),
    ("contact.invalidEmail", "Invalid email address"),
    ("footer.rights", "All rights reserved."),
];

const FR: &[(&str, &str)] = &[
    ("nav.home", "Accueil"),
    ("nav.services", "Services"),
    ("nav.about", "À propos"),
    ("nav.contact", "Contact"),
    ("nav.toggleMenu", "Afficher le menu"),
    ("nav.switchLanguage", "Passer à l'anglais"),
    ("nav.darkMode", "Passer en mode sombre"),
    ("nav.lightMode", "Passer en mode clair"),
    ("hero.title", "Une technologie qui travaille aussi fort que vous"),
    (
        "hero.subtitle",
        "Pladd aide les entreprises en croissance à sécuriser, soutenir et faire évoluer leur informatique, du soutien technique jusqu'au nuage.",
    ),
    ("hero.cta", "Découvrir nos services"),
    ("hero.contact", "Parler à un expert"),
    ("services.title", "Nos services"),
    (
        "services.subtitle",
        "Des services-conseils complets pour les équipes qui veulent une technologie discrète.",
    ),
    ("services.cybersecurity.title", "Cybersécurité"),
    (
        "services.cybersecurity.description",
        "Audits, renforcement et surveillance pour protéger vos données et votre réputation.",
    ),
    ("services.techSupport.title", "Soutien technique"),
    (
        "services.techSupport.description",
        "Un centre d'assistance réactif et du soutien sur place pour tous vos appareils.",
    ),
    ("services.cloudServices.title", "Services infonuagiques"),
    (
        "services.cloudServices.description",
        "Migrations, sauvegardes et maîtrise des coûts pour les plateformes dont vous dépendez.",
    ),
    ("services.networkSolutions.title", "Solutions réseau"),
    (
        "services.networkSolutions.description",
        "Des réseaux rapides et fiables, conçus, installés et entretenus par des ingénieurs certifiés.",
    ),
    ("stats.title", "La confiance des entreprises de la région"),
    ("stats.clients", "Clients satisfaits"),
    ("stats.issues", "Problèmes résolus"),
    ("stats.uptime", "Disponibilité du réseau"),
    ("testimonials.title", "Ce que disent nos clients"),
    (
        "testimonials.testimonial1.quote",
        "Pladd a refait notre réseau en une fin de semaine. Lundi matin, tout fonctionnait.",
    ),
    ("testimonials.testimonial1.author", "Marie Tremblay"),
    ("testimonials.testimonial1.company", "Tremblay & Associés"),
    (
        "testimonials.testimonial2.quote",
        "Leur audit de sécurité a révélé des failles insoupçonnées, corrigées rapidement.",
    ),
    ("testimonials.testimonial2.author", "David Chen"),
    ("testimonials.testimonial2.company", "Northwind Logistique"),
    ("contact.title", "Contactez-nous"),
    (
        "contact.subtitle",
        "Parlez-nous de votre projet et nous vous répondrons en un jour ouvrable.",
    ),
    ("contact.name", "Nom"),
    ("contact.email", "Courriel"),
    ("contact.phone", "Téléphone"),
    ("contact.message", "Message"),
    ("contact.submit", "Envoyer le message"),
    ("contact.sending", "Envoi en cours..."),
    ("contact.success", "Merci! Votre message a été envoyé."),
    ("contact.required", "Ce champ est obligatoire"),
    ("contact.invalidEmail", "Adresse courriel invalide"),
    ("footer.rights", "Tous droits réservés."),
];
