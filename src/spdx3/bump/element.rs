//! Packages, files and snippets.
//!
//! `NOASSERTION` and `NONE` lower to an absent property; only concrete values
//! are carried over.

use super::checksum::bump_checksum;
use super::Bumper;
use crate::model::{self as spdx2, Actor, FileType, PrimaryPackagePurpose, ThreeValued};
use crate::spdx3::model::{
    Element, ElementInfo, File, Package, PositiveIntegerRange, Snippet, SoftwareArtifact,
    SoftwarePurpose,
};

fn concrete<T: Clone>(value: Option<&ThreeValued<T>>) -> Option<T> {
    value.and_then(ThreeValued::value).cloned()
}

fn package_purpose(purpose: PrimaryPackagePurpose) -> SoftwarePurpose {
    match purpose {
        PrimaryPackagePurpose::Application => SoftwarePurpose::Application,
        PrimaryPackagePurpose::Framework => SoftwarePurpose::Framework,
        PrimaryPackagePurpose::Library => SoftwarePurpose::Library,
        PrimaryPackagePurpose::Container => SoftwarePurpose::Container,
        PrimaryPackagePurpose::OperatingSystem => SoftwarePurpose::OperatingSystem,
        PrimaryPackagePurpose::Device => SoftwarePurpose::Device,
        PrimaryPackagePurpose::Firmware => SoftwarePurpose::Firmware,
        PrimaryPackagePurpose::Source => SoftwarePurpose::Source,
        PrimaryPackagePurpose::Archive => SoftwarePurpose::Archive,
        PrimaryPackagePurpose::File => SoftwarePurpose::File,
        PrimaryPackagePurpose::Install => SoftwarePurpose::Install,
        PrimaryPackagePurpose::Other => SoftwarePurpose::Other,
    }
}

fn file_purpose(file_type: FileType) -> SoftwarePurpose {
    match file_type {
        FileType::Source => SoftwarePurpose::Source,
        FileType::Binary => SoftwarePurpose::Executable,
        FileType::Archive => SoftwarePurpose::Archive,
        FileType::Application => SoftwarePurpose::Application,
        FileType::Documentation => SoftwarePurpose::Documentation,
        FileType::Spdx => SoftwarePurpose::Bom,
        FileType::Audio | FileType::Image | FileType::Text | FileType::Video => {
            SoftwarePurpose::Data
        }
        FileType::Other => SoftwarePurpose::Other,
    }
}

impl Bumper<'_> {
    fn element_info(&self, spdx2_id: &str) -> ElementInfo {
        ElementInfo::new(self.element_id(spdx2_id), self.creation_info.clone())
    }

    fn agent(&mut self, actor: Option<&ThreeValued<Actor>>) -> Option<String> {
        concrete(actor).map(|actor| self.intern_actor(&actor))
    }

    pub(super) fn bump_package(&mut self, package: &spdx2::Package) {
        let mut element = self.element_info(&package.spdx_id).with_name(package.name.clone());
        element.summary = package.summary.clone();
        element.description = package.description.clone();
        element.comment = package.comment.clone();
        element.verified_using = package.checksums.iter().map(bump_checksum).collect();

        let supplied_by = self.agent(package.supplier.as_ref());
        let originated_by = self.agent(package.originator.as_ref()).into_iter().collect();
        let artifact = SoftwareArtifact {
            supplied_by,
            originated_by,
            built_time: package.built_date,
            release_time: package.release_date,
            valid_until_time: package.valid_until_date,
            primary_purpose: package.primary_package_purpose.map(package_purpose),
            additional_purpose: Vec::new(),
            copyright_text: concrete(package.copyright_text.as_ref()),
            attribution_text: package.attribution_texts.clone(),
        };

        let mut bumped = Package::new(element);
        bumped.artifact = artifact;
        bumped.package_version = package.version.clone();
        bumped.download_location = package.download_location.value().cloned();
        bumped.homepage = concrete(package.homepage.as_ref());
        bumped.source_info = package.source_info.clone();
        self.bump_external_refs(package, &mut bumped);

        if package.file_name.is_some() {
            self.missing_conversion("package.file_name", "no counterpart in SPDX 3");
        }
        if package.verification_code.is_some() {
            self.missing_conversion("package.verification_code", "no counterpart in SPDX 3");
        }
        if !package.license_info_from_files.is_empty() {
            self.missing_conversion("package.license_info_from_files", "no counterpart in SPDX 3");
        }
        if package.license_comment.is_some() {
            self.missing_conversion("package.license_comment", "no counterpart in SPDX 3");
        }

        let spdx_id = bumped.element.spdx_id.clone();
        self.payload.add_element(Element::Package(bumped));
        self.bump_license_fields(
            &spdx_id,
            package.license_concluded.as_ref(),
            package.license_declared.as_ref(),
        );
    }

    pub(super) fn bump_file(&mut self, file: &spdx2::File) {
        let mut element = self.element_info(&file.spdx_id).with_name(file.name.clone());
        element.comment = file.comment.clone();
        element.verified_using = file.checksums.iter().map(bump_checksum).collect();

        let mut purposes = file.file_types.iter().copied().map(file_purpose);
        let artifact = SoftwareArtifact {
            primary_purpose: purposes.next(),
            additional_purpose: purposes.collect(),
            copyright_text: concrete(file.copyright_text.as_ref()),
            attribution_text: file.attribution_texts.clone(),
            ..SoftwareArtifact::default()
        };

        if file.notice.is_some() {
            self.missing_conversion("file.notice", "no counterpart in SPDX 3");
        }
        if !file.contributors.is_empty() {
            self.missing_conversion("file.contributors", "no counterpart in SPDX 3");
        }
        if !file.license_info_in_file.is_empty() {
            self.missing_conversion("file.license_info_in_file", "no counterpart in SPDX 3");
        }
        if file.license_comment.is_some() {
            self.missing_conversion("file.license_comment", "no counterpart in SPDX 3");
        }

        let spdx_id = element.spdx_id.clone();
        self.payload.add_element(Element::File(File { element, artifact }));
        self.bump_license_fields(&spdx_id, file.license_concluded.as_ref(), None);
    }

    pub(super) fn bump_snippet(&mut self, snippet: &spdx2::Snippet) {
        let mut element = self.element_info(&snippet.spdx_id);
        element.name = snippet.name.clone();
        element.comment = snippet.comment.clone();

        let artifact = SoftwareArtifact {
            copyright_text: concrete(snippet.copyright_text.as_ref()),
            attribution_text: snippet.attribution_texts.clone(),
            ..SoftwareArtifact::default()
        };

        if !snippet.license_info_in_snippet.is_empty() {
            self.missing_conversion("snippet.license_info_in_snippet", "no counterpart in SPDX 3");
        }
        if snippet.license_comment.is_some() {
            self.missing_conversion("snippet.license_comment", "no counterpart in SPDX 3");
        }

        let spdx_id = element.spdx_id.clone();
        let bumped = Snippet {
            element,
            artifact,
            snippet_from_file: self.element_id(&snippet.file_spdx_id),
            byte_range: PositiveIntegerRange::from(snippet.byte_range),
            line_range: snippet.line_range.map(PositiveIntegerRange::from),
        };
        self.payload.add_element(Element::Snippet(bumped));
        self.bump_license_fields(&spdx_id, snippet.license_concluded.as_ref(), None);
    }
}
